//! Generating OtF formulas from blocks

pub mod formatter;
mod renderer;
mod syntax;
mod terminal;

pub use formatter::format_to_fragments;
pub use renderer::*;
pub use syntax::*;
pub use terminal::Terminal;
