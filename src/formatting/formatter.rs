//! Code generator for OtF formulas

use std::borrow::Cow;
use std::ops::Range;

use tracing::{debug, trace};

use crate::formatting::*;
use crate::language::*;

pub type Fragment<'i> = (Syntax, Cow<'i, str>);

/// Convert a sequence of blocks into tagged fragments. Concatenating the
/// content of the fragments gives the plain formula.
pub fn format_to_fragments<'i>(blocks: &'i [Block], flags: Flags) -> Vec<Fragment<'i>> {
    let entries = prepare(blocks);

    let chains = if flags.formula {
        detect_chains(&entries)
    } else {
        Vec::new()
    };

    debug!(
        "Generating from {} of {} blocks, {} modifier chain{}",
        entries.len(),
        blocks.len(),
        chains.len(),
        if chains.len() == 1 { "" } else { "s" }
    );

    let mut output = Generator::new(flags);

    let mut i = 0;
    while i < entries.len() {
        if let Some(chain) = chains
            .iter()
            .find(|chain| chain.start == i)
        {
            output.format_chain(&entries[chain.clone()]);
            i = chain.end;
            continue;
        }

        let entry = &entries[i];
        if !entry.consumed {
            if i > 0 && entry.kind == BlockKind::Text && entries[i - 1].kind == BlockKind::Text {
                output.append_comma();
            }
            output.format_block(entry);
        }
        i += 1;
    }

    let has_label = entries
        .iter()
        .any(|entry| entry.kind == BlockKind::Label);
    let has_if = entries
        .iter()
        .any(|entry| entry.kind == BlockKind::If);

    output.assemble(has_label && has_if)
}

/// A block that contributes to output. Blocks with nothing to emit have
/// already been dropped, so neighbours here are the neighbours that the
/// adjacency rules see.
#[derive(Debug)]
struct Entry<'i> {
    kind: BlockKind,
    content: &'i str,
    based: Option<&'i str>,
    consumed: bool,
}

fn prepare(blocks: &[Block]) -> Vec<Entry<'_>> {
    let mut entries: Vec<Entry<'_>> = blocks
        .iter()
        .filter_map(|block| {
            block
                .content()
                .map(|content| Entry {
                    kind: block.kind,
                    content,
                    based: None,
                    consumed: false,
                })
        })
        .collect();

    pair_based(&mut entries);
    entries
}

/// Attach each Based block to the data block immediately before it. The
/// predecessor carries the qualifier from here on and the Based entry is
/// left in place, marked as consumed.
fn pair_based(entries: &mut [Entry<'_>]) {
    for i in 1..entries.len() {
        if entries[i].kind != BlockKind::Based {
            continue;
        }
        if !entries[i - 1]
            .kind
            .accepts_based()
        {
            continue;
        }

        let qualifier = entries[i].content;
        trace!("Based:{} attached to {}", qualifier, entries[i - 1].kind);
        entries[i - 1].based = Some(qualifier);
        entries[i].consumed = true;
    }
}

/// Find runs alternating Modifier and And blocks, starting and ending on a
/// Modifier, that collapse into a single bracketed expression.
fn detect_chains(entries: &[Entry<'_>]) -> Vec<Range<usize>> {
    let mut chains = Vec::new();

    let mut i = 0;
    while i < entries.len() {
        if entries[i].kind != BlockKind::Modifier {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end + 1 < entries.len()
            && entries[end].kind == BlockKind::And
            && entries[end + 1].kind == BlockKind::Modifier
        {
            end += 2;
        }

        // at least `mod and mod`
        if end - i >= 3 {
            trace!("Modifier chain over entries {:?}", i..end);
            chains.push(i..end);
            i = end;
        } else {
            i += 1;
        }
    }

    chains
}

/// One space-separated unit of the final formula.
struct Part<'i> {
    fragments: Vec<Fragment<'i>>,
}

impl<'i> Part<'i> {
    fn new() -> Part<'i> {
        Part {
            fragments: Vec::new(),
        }
    }

    fn push(&mut self, syntax: Syntax, content: impl Into<Cow<'i, str>>) {
        self.fragments
            .push((syntax, content.into()));
    }

    fn wrap(&mut self) {
        self.fragments
            .insert(0, (Syntax::Bracket, Cow::Borrowed("[")));
        self.push(Syntax::Bracket, "]");
    }

    fn plain(&self) -> String {
        let mut result = String::new();
        for (_, content) in &self.fragments {
            result.push_str(content);
        }
        result
    }
}

struct Generator<'i> {
    flags: Flags,
    parts: Vec<Part<'i>>,
    depth: usize,
}

impl<'i> Generator<'i> {
    fn new(flags: Flags) -> Generator<'i> {
        Generator {
            flags,
            parts: Vec::new(),
            depth: 0,
        }
    }

    fn format_block(&mut self, entry: &Entry<'i>) {
        let mut part = Part::new();
        let content = entry.content;

        match entry.kind {
            BlockKind::Label => {
                quoted(&mut part, Syntax::Label, content);
            }
            BlockKind::Text => {
                // formula mode brackets text instead of quoting it
                if self
                    .flags
                    .formula
                {
                    part.push(Syntax::String, content);
                } else {
                    quoted(&mut part, Syntax::String, content);
                }
            }
            BlockKind::Skills => {
                self.append_blind(&mut part);
                part.push(Syntax::Prefix, "Sk:");
                part.push(Syntax::Data, content);
            }
            BlockKind::Spells => {
                self.append_blind(&mut part);
                part.push(Syntax::Prefix, "S: ");
                part.push(Syntax::Data, content);
            }
            BlockKind::Attributes => {
                self.append_blind(&mut part);
                part.push(Syntax::Data, content);
            }
            BlockKind::Costs => {
                part.push(Syntax::Prefix, "*Costs ");
                part.push(Syntax::Data, content);
            }
            BlockKind::Ranged => {
                part.push(Syntax::Prefix, "R:");
                part.push(Syntax::Data, content);
            }
            BlockKind::Melee => {
                part.push(Syntax::Prefix, "M:");
                part.push(Syntax::Data, content);
            }
            BlockKind::WeaponDamage => {
                part.push(Syntax::Prefix, "D:");
                quoted(&mut part, Syntax::Data, content);
            }
            BlockKind::Parry => {
                part.push(Syntax::Prefix, "P:");
                part.push(Syntax::Data, content);
            }
            BlockKind::Damage => {
                part.push(Syntax::Data, content);
            }
            BlockKind::Modifier => {
                part.push(Syntax::Modifier, content);
            }
            BlockKind::Based => {
                qualify(&mut part, content);
            }
            BlockKind::Or | BlockKind::And | BlockKind::Check | BlockKind::Line => {
                part.push(Syntax::Operator, content);
            }
            BlockKind::If | BlockKind::Else => {
                part.push(Syntax::Keyword, content);
            }
            BlockKind::GroupStart => {
                self.depth += 1;
                part.push(Syntax::Structure, content);
            }
            BlockKind::GroupEnd => {
                match self
                    .depth
                    .checked_sub(1)
                {
                    Some(depth) => self.depth = depth,
                    None => debug!("Group end without an open group"),
                }
                part.push(Syntax::Structure, content);
            }
        }

        if let Some(qualifier) = entry.based {
            part.push(Syntax::Neutral, " ");
            qualify(&mut part, qualifier);
        }

        if self
            .flags
            .formula
            && wraps_individually(entry.kind)
        {
            part.wrap();
        }

        trace!("{} formatted as {}", entry.kind, part.plain());
        self.parts
            .push(part);
    }

    fn format_chain(&mut self, members: &[Entry<'i>]) {
        let mut part = Part::new();

        for (i, member) in members
            .iter()
            .enumerate()
        {
            if i > 0 {
                part.push(Syntax::Neutral, " ");
            }
            match member.kind {
                BlockKind::And => part.push(Syntax::Operator, member.content),
                _ => part.push(Syntax::Modifier, member.content),
            }
            if let Some(qualifier) = member.based {
                part.push(Syntax::Neutral, " ");
                qualify(&mut part, qualifier);
            }
        }
        part.wrap();

        trace!("Modifier chain combined as {}", part.plain());
        self.parts
            .push(part);
    }

    fn append_blind(&self, part: &mut Part<'i>) {
        if self
            .flags
            .blind
        {
            part.push(Syntax::Blind, "!");
        }
    }

    fn append_comma(&mut self) {
        if let Some(last) = self
            .parts
            .last_mut()
        {
            last.push(Syntax::Separator, ",");
        }
    }

    /// Join the parts with single spaces, wrapping the whole in one pair of
    /// brackets where the mode calls for it.
    fn assemble(self, enclose_all: bool) -> Vec<Fragment<'i>> {
        if self
            .parts
            .is_empty()
        {
            return Vec::new();
        }

        if self.depth > 0 {
            debug!("{} group(s) left open", self.depth);
        }

        let wrap = if enclose_all {
            true
        } else if self
            .flags
            .formula
        {
            false
        } else {
            !self
                .parts
                .iter()
                .any(|part| {
                    let plain = part.plain();
                    plain == "/if" || plain == "/else"
                })
        };

        let mut fragments = Vec::new();

        if wrap {
            fragments.push((Syntax::Bracket, Cow::Borrowed("[")));
        }
        for (i, part) in self
            .parts
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                fragments.push((Syntax::Neutral, Cow::Borrowed(" ")));
            }
            fragments.extend(part.fragments);
        }
        if wrap {
            fragments.push((Syntax::Bracket, Cow::Borrowed("]")));
        }

        fragments
    }
}

fn quoted<'i>(part: &mut Part<'i>, syntax: Syntax, content: &'i str) {
    part.push(Syntax::Quote, "\"");
    part.push(syntax, content);
    part.push(Syntax::Quote, "\"");
}

fn qualify<'i>(part: &mut Part<'i>, content: &'i str) {
    part.push(Syntax::Qualifier, "(Based:");
    part.push(Syntax::Data, content);
    part.push(Syntax::Qualifier, ")");
}

/// Whether a block of this kind gets its own brackets in formula mode.
fn wraps_individually(kind: BlockKind) -> bool {
    !matches!(
        kind,
        BlockKind::If
            | BlockKind::Else
            | BlockKind::Label
            | BlockKind::Based
            | BlockKind::GroupStart
            | BlockKind::GroupEnd
    )
}
