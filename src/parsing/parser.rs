//! Reading workspace files: an ordered list of blocks plus the mode flags

use std::fmt;

use serde::Deserialize;
use toml::Spanned;
use tracing::trace;

use crate::language::*;

/// The blocks of a workspace in order, with the byte offset in the source
/// file where each one's type was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub flags: Flags,
    pub blocks: Vec<Block>,
    pub offsets: Vec<usize>,
}

impl Workspace {
    pub fn tags(&self) -> Vec<&'static str> {
        self.blocks
            .iter()
            .map(|block| block.kind.tag())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    InvalidSyntax(usize, String),
    UnknownBlock(usize, String),
}

impl ParsingError {
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::InvalidSyntax(offset, _) => *offset,
            ParsingError::UnknownBlock(offset, _) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::InvalidSyntax(_, _) => "invalid workspace file".to_string(),
            ParsingError::UnknownBlock(_, tag) => format!("unknown block type '{}'", tag),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkspace {
    #[serde(default)]
    blind: bool,
    #[serde(default)]
    formula: bool,
    #[serde(default, rename = "block")]
    blocks: Vec<RawBlock>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: Spanned<String>,
    #[serde(default)]
    text: String,
}

pub fn parse_workspace(content: &str) -> Result<Workspace, Vec<ParsingError>> {
    let raw: RawWorkspace = match toml::from_str(content) {
        Ok(raw) => raw,
        Err(error) => {
            let offset = error
                .span()
                .map(|span| span.start)
                .unwrap_or(0);
            return Err(vec![ParsingError::InvalidSyntax(
                offset,
                error
                    .message()
                    .to_string(),
            )]);
        }
    };

    let mut errors = Vec::new();
    let mut blocks = Vec::with_capacity(
        raw.blocks
            .len(),
    );
    let mut offsets = Vec::with_capacity(
        raw.blocks
            .len(),
    );

    for entry in raw.blocks {
        let offset = entry
            .kind
            .span()
            .start;
        let tag = entry
            .kind
            .into_inner();

        match tag.parse::<BlockKind>() {
            Ok(kind) => {
                trace!("{} at offset {}", kind, offset);
                blocks.push(Block::new(kind, entry.text));
                offsets.push(offset);
            }
            Err(UnknownKind(tag)) => errors.push(ParsingError::UnknownBlock(offset, tag)),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Workspace {
        flags: Flags::new(raw.blind, raw.formula),
        blocks,
        offsets,
    })
}
