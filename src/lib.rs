//! Generate On-the-Fly roll formulas from ordered sequences of typed
//! blocks, and point out suspicious arrangements of those blocks.

pub mod formatting;
pub mod language;
pub mod parsing;
pub mod validation;

pub use formatting::generate;
pub use validation::validate;
