// Presenting loading errors and validation issues to the user

mod format;
mod messages;

// Re-export all public symbols
pub use format::*;
