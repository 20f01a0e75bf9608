//! Sliding window matcher and bracket balance scan

use tracing::debug;

use crate::language::{Block, BlockKind};
use crate::validation::*;

/// A problem found in a block sequence, pointing at one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub index: usize,
}

impl Issue {
    /// The built-in rule this issue was raised by.
    pub fn rule(&self) -> Option<&'static Rule> {
        lookup(self.rule_id)
    }
}

/// Check a sequence of block type tags against the built-in rules.
pub fn validate<S: AsRef<str>>(tags: &[S]) -> Vec<Issue> {
    validate_with(RULES, tags)
}

/// Check the blocks of a workspace, empty ones included.
pub fn validate_blocks(blocks: &[Block]) -> Vec<Issue> {
    let tags: Vec<&str> = blocks
        .iter()
        .map(|block| block.kind.tag())
        .collect();

    validate(&tags)
}

/// Check a sequence of block type tags against the given rules. Every
/// match of every enabled rule is reported, followed by any unbalanced
/// group brackets.
pub fn validate_with<S: AsRef<str>>(rules: &[Rule], tags: &[S]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for rule in rules
        .iter()
        .filter(|rule| rule.enabled)
    {
        let width = rule
            .pattern
            .len();
        if width == 0 || width > tags.len() {
            continue;
        }

        for (start, window) in tags
            .windows(width)
            .enumerate()
        {
            if matches_pattern(rule.pattern, window) {
                issues.push(Issue {
                    rule_id: rule.id,
                    severity: rule.severity,
                    index: rule.highlighted(start),
                });
            }
        }
    }

    issues.extend(check_groups(tags));

    debug!(
        "Validated {} block{}, {} issue{}",
        tags.len(),
        if tags.len() == 1 { "" } else { "s" },
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    );

    issues
}

fn matches_pattern<S: AsRef<str>>(pattern: &[BlockKind], window: &[S]) -> bool {
    pattern
        .iter()
        .zip(window)
        .all(|(kind, tag)| kind.tag() == tag.as_ref())
}

/// Pair group starts with group ends. Ends with nothing to close are
/// reported where they occur, then any starts left open.
fn check_groups<S: AsRef<str>>(tags: &[S]) -> Vec<Issue> {
    let start = BlockKind::GroupStart.tag();
    let end = BlockKind::GroupEnd.tag();

    let mut issues = Vec::new();
    let mut stack = Vec::new();

    for (i, tag) in tags
        .iter()
        .enumerate()
    {
        let tag = tag.as_ref();
        if tag == start {
            stack.push(i);
        } else if tag == end && stack
            .pop()
            .is_none()
        {
            issues.push(Issue {
                rule_id: UNMATCHED_GROUP_END.id,
                severity: UNMATCHED_GROUP_END.severity,
                index: i,
            });
        }
    }

    for i in stack {
        issues.push(Issue {
            rule_id: UNMATCHED_GROUP_START.id,
            severity: UNMATCHED_GROUP_START.severity,
            index: i,
        });
    }

    issues
}
