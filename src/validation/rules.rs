//! The table of patterns the validator looks for

use std::fmt;

use crate::language::BlockKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Which block of a matched window an issue points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    At(usize),
    Last,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub pattern: &'static [BlockKind],
    pub highlight: Highlight,
    pub severity: Severity,
    pub enabled: bool,
}

impl Rule {
    /// Translate the highlight of a window starting at `start` into an
    /// index into the whole sequence.
    pub fn highlighted(&self, start: usize) -> usize {
        match self.highlight {
            Highlight::At(offset) => start + offset,
            Highlight::Last => {
                start
                    + self
                        .pattern
                        .len()
                        .saturating_sub(1)
            }
        }
    }
}

pub static RULES: &[Rule] = &[
    Rule {
        id: "consecutive-if",
        name: "Consecutive If Blocks",
        description: "Consecutive If blocks may indicate logical redundancy or a structural problem.",
        pattern: &[BlockKind::If, BlockKind::If],
        highlight: Highlight::Last,
        severity: Severity::Warning,
        enabled: true,
    },
    Rule {
        id: "consecutive-skills-after-label",
        name: "Consecutive Skills After Label",
        description: "Multiple skills after a label can make the formula confusing to interpret.",
        pattern: &[BlockKind::Label, BlockKind::Skills, BlockKind::Skills],
        highlight: Highlight::Last,
        severity: Severity::Warning,
        enabled: true,
    },
    Rule {
        id: "multiple-consecutive-skills",
        name: "Multiple Consecutive Skills",
        description: "Three or more consecutive skills suggest an unnecessarily complex structure.",
        pattern: &[BlockKind::Skills, BlockKind::Skills, BlockKind::Skills],
        highlight: Highlight::Last,
        severity: Severity::Error,
        enabled: true,
    },
    Rule {
        id: "consecutive-attributes",
        name: "Consecutive Attributes",
        description: "Several attributes in a row may indicate redundancy or a structuring mistake.",
        pattern: &[BlockKind::Attributes, BlockKind::Attributes],
        highlight: Highlight::Last,
        severity: Severity::Warning,
        enabled: true,
    },
    Rule {
        id: "damage-before-attack",
        name: "Damage Before Attack",
        description: "Damage placed before a melee attack may mean the elements are out of order.",
        pattern: &[BlockKind::Damage, BlockKind::Melee],
        highlight: Highlight::At(0),
        severity: Severity::Warning,
        enabled: true,
    },
    Rule {
        id: "damage-before-ranged",
        name: "Damage Before Ranged",
        description: "Damage placed before a ranged attack may mean the elements are out of order.",
        pattern: &[BlockKind::Damage, BlockKind::Ranged],
        highlight: Highlight::At(0),
        severity: Severity::Warning,
        enabled: true,
    },
];

/// Reported by the bracket balance scan rather than by pattern matching.
pub static UNMATCHED_GROUP_START: Rule = Rule {
    id: "unmatched-group-start",
    name: "Unmatched Group Start",
    description: "A group start without a matching group end produces an unbalanced formula.",
    pattern: &[BlockKind::GroupStart],
    highlight: Highlight::At(0),
    severity: Severity::Error,
    enabled: true,
};

pub static UNMATCHED_GROUP_END: Rule = Rule {
    id: "unmatched-group-end",
    name: "Unmatched Group End",
    description: "A group end without a matching group start produces an unbalanced formula.",
    pattern: &[BlockKind::GroupEnd],
    highlight: Highlight::At(0),
    severity: Severity::Error,
    enabled: true,
};

/// Find the rule with the given identifier, including the bracket rules.
pub fn lookup(id: &str) -> Option<&'static Rule> {
    RULES
        .iter()
        .chain([&UNMATCHED_GROUP_START, &UNMATCHED_GROUP_END])
        .find(|rule| rule.id == id)
}
