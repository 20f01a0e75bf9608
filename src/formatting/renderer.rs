//! Two pass rendering of blocks into a formula

use std::borrow::Cow;

use crate::formatting::*;
use crate::language::*;

/// We do the code generation in two passes. First we convert the blocks
/// into a Vec of "fragments" (Syntax tag, String pairs). Then second we
/// apply the specified renderer to each pair to result in a plain or
/// highlighted String.
pub fn render(renderer: &impl Render, blocks: &[Block], flags: Flags) -> String {
    // Pass 1: Format blocks to tagged fragments
    let fragments = format_to_fragments(blocks, flags);

    // Pass 2: Render tagged fragments to final output
    render_to_string(renderer, fragments)
}

/// Generate the plain formula for a sequence of blocks.
pub fn generate(blocks: &[Block], flags: Flags) -> String {
    render(&Identity, blocks, flags)
}

/// Pass 2: apply markup to fragments via style() and combine.
fn render_to_string<'i>(renderer: &impl Render, fragments: Vec<(Syntax, Cow<'i, str>)>) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(syntax, &content);
        output.push_str(&rendered);
    }

    output
}
