//! Scanning block sequences for suspicious arrangements

mod checker;
mod rules;

pub use checker::*;
pub use rules::*;
