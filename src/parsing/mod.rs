//! Loading workspace files

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

mod parser;

pub use parser::{ParsingError, Workspace};

/// Read a file and return an owned String. A filename of "-" reads from
/// standard input.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    if filename.to_str() == Some("-") {
        let mut content = String::new();
        return match std::io::stdin().read_to_string(&mut content) {
            Ok(_) => Ok(content),
            Err(error) => {
                debug!(?error);
                Err(LoadingError {
                    problem: "Failed reading standard input".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                })
            }
        };
    }

    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a Workspace, or return the list of errors encountered.
pub fn parse(filename: &Path, content: &str) -> Result<Workspace, Vec<ParsingError>> {
    let result = parser::parse_workspace(content);

    match result {
        Ok(workspace) => {
            let count = workspace
                .blocks
                .len();
            debug!(
                "Found {} block{} in {}",
                count,
                if count == 1 { "" } else { "s" },
                filename.display()
            );
            Ok(workspace)
        }
        Err(errors) => {
            debug!("errors: {}", errors.len());
            Err(errors)
        }
    }
}
