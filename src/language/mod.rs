// Types representing blocks, their kinds, and the modes they render under

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
