//! Types representing blocks and the registry of block kinds

use std::fmt;
use std::str::FromStr;

/// The closed set of block kinds that can be placed in a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Label,
    Text,
    Attributes,
    Spells,
    Skills,
    Costs,
    Modifier,
    Or,
    And,
    Ranged,
    Melee,
    WeaponDamage,
    Parry,
    Damage,
    Check,
    If,
    Else,
    Line,
    Based,
    GroupStart,
    GroupEnd,
}

/// Immutable description of a block kind, as shown in the palette.
#[derive(Debug, PartialEq, Eq)]
pub struct BlockType {
    pub kind: BlockKind,
    pub tag: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub fixed: Option<&'static str>,
    pub formula_only: bool,
}

impl BlockType {
    /// Whether an instance of this type carries free-form user text.
    pub fn editable(&self) -> bool {
        self.fixed
            .is_none()
    }
}

/// Every block kind in palette order.
pub static REGISTRY: [BlockType; 21] = [
    BlockType {
        kind: BlockKind::Label,
        tag: "label",
        label: "Label",
        description: "Descriptive labels for fields and properties",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Text,
        tag: "text",
        label: "Text",
        description: "Custom literal text content",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Attributes,
        tag: "atributos",
        label: "Attributes",
        description: "Character attributes like Strength, Dexterity, etc.",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Spells,
        tag: "spells",
        label: "Spells",
        description: "Magic spells and abilities",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Skills,
        tag: "skills",
        label: "Skills",
        description: "Character skills and proficiencies",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Costs,
        tag: "costs",
        label: "Costs",
        description: "Resource costs for actions",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Modifier,
        tag: "mod",
        label: "Modifier",
        description: "Numeric modifier for rolls and calculations",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Or,
        tag: "or",
        label: "Or",
        description: "Logical OR operator",
        fixed: Some("|"),
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::And,
        tag: "and",
        label: "And",
        description: "Logical AND operator, joins modifier chains",
        fixed: Some("&"),
        formula_only: true,
    },
    BlockType {
        kind: BlockKind::Ranged,
        tag: "ranged",
        label: "Ranged",
        description: "Ranged attack values",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Melee,
        tag: "melee",
        label: "Melee",
        description: "Melee attack values",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::WeaponDamage,
        tag: "weapond",
        label: "Weapon Damage",
        description: "Weapon damage values",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Parry,
        tag: "parry",
        label: "Parry",
        description: "Parry defense values",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Damage,
        tag: "damage",
        label: "Damage",
        description: "Damage values and calculations",
        fixed: None,
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::Check,
        tag: "check",
        label: "Check",
        description: "Condition check operator",
        fixed: Some("?"),
        formula_only: false,
    },
    BlockType {
        kind: BlockKind::If,
        tag: "if",
        label: "If",
        description: "Conditional if statement",
        fixed: Some("/if"),
        formula_only: true,
    },
    BlockType {
        kind: BlockKind::Else,
        tag: "else",
        label: "Else",
        description: "Conditional else statement",
        fixed: Some("/else"),
        formula_only: true,
    },
    BlockType {
        kind: BlockKind::Line,
        tag: "line",
        label: "Line",
        description: "Line separator",
        fixed: Some("/"),
        formula_only: true,
    },
    BlockType {
        kind: BlockKind::Based,
        tag: "based",
        label: "Based",
        description: "Based on another value, attaches to the preceding block",
        fixed: None,
        formula_only: true,
    },
    BlockType {
        kind: BlockKind::GroupStart,
        tag: "group-start",
        label: "Group Start",
        description: "Opens a nested group",
        fixed: Some("{"),
        formula_only: true,
    },
    BlockType {
        kind: BlockKind::GroupEnd,
        tag: "group-end",
        label: "Group End",
        description: "Closes the innermost open group",
        fixed: Some("}"),
        formula_only: true,
    },
];

impl BlockKind {
    /// The registry entry describing this kind.
    pub fn definition(self) -> &'static BlockType {
        // REGISTRY is laid out in declaration order
        &REGISTRY[self as usize]
    }

    pub fn tag(self) -> &'static str {
        self.definition()
            .tag
    }

    pub fn fixed(self) -> Option<&'static str> {
        self.definition()
            .fixed
    }

    pub fn is_formula_only(self) -> bool {
        self.definition()
            .formula_only
    }

    pub fn from_tag(tag: &str) -> Option<BlockKind> {
        REGISTRY
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.kind)
    }

    /// Data blocks that a following Based block attaches itself to.
    pub fn accepts_based(self) -> bool {
        matches!(
            self,
            BlockKind::Spells
                | BlockKind::Skills
                | BlockKind::Attributes
                | BlockKind::Costs
                | BlockKind::Ranged
                | BlockKind::Melee
                | BlockKind::WeaponDamage
                | BlockKind::Parry
                | BlockKind::Damage
                | BlockKind::Modifier
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a type tag names no block kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type '{}'", self.0)
    }
}

impl FromStr for BlockKind {
    type Err = UnknownKind;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        BlockKind::from_tag(tag).ok_or_else(|| UnknownKind(tag.to_string()))
    }
}

/// One block placed in a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
}

impl Block {
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Block {
        Block {
            kind,
            text: text.into(),
        }
    }

    /// What this block contributes: its fixed literal if the kind has one,
    /// otherwise the trimmed user text. None if there is nothing to emit.
    pub fn content(&self) -> Option<&str> {
        if let Some(fixed) = self
            .kind
            .fixed()
        {
            return Some(fixed);
        }

        let text = self
            .text
            .trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Global modes that change how blocks are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub blind: bool,
    pub formula: bool,
}

impl Flags {
    pub fn new(blind: bool, formula: bool) -> Flags {
        Flags { blind, formula }
    }

    /// Blind rolls are unavailable while formula mode is on; this resolves
    /// the pair the way the editor presents it.
    pub fn effective(self) -> Flags {
        if self.formula {
            Flags {
                blind: false,
                formula: true,
            }
        } else {
            self
        }
    }
}
