//! Five-element (五行) classification of branch glyphs and annotated text

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five elements. "No category" is `Option<Element>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// Earthly branch glyph -> element.
///
/// 辰戌丑未 share Earth; every other pair maps to one element.
const BRANCH_TABLE: [(char, Element); 12] = [
    ('子', Element::Water),
    ('亥', Element::Water),
    ('寅', Element::Wood),
    ('卯', Element::Wood),
    ('巳', Element::Fire),
    ('午', Element::Fire),
    ('申', Element::Metal),
    ('酉', Element::Metal),
    ('辰', Element::Earth),
    ('戌', Element::Earth),
    ('丑', Element::Earth),
    ('未', Element::Earth),
];

/// Text-mode lookup order; first glyph found wins.
const TEXT_PRIORITY: [Element; 5] = [
    Element::Earth,
    Element::Wood,
    Element::Fire,
    Element::Metal,
    Element::Water,
];

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// The element's own glyph (木 火 土 金 水).
    pub fn glyph(self) -> char {
        match self {
            Element::Wood => '木',
            Element::Fire => '火',
            Element::Earth => '土',
            Element::Metal => '金',
            Element::Water => '水',
        }
    }

    /// Presentation class name attached to classified nodes.
    pub fn css_class(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }

    /// Inverse of [`Element::css_class`].
    pub fn from_css_class(class: &str) -> Option<Element> {
        Element::ALL.into_iter().find(|e| e.css_class() == class)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_class())
    }
}

/// Classify a single earthly branch glyph.
pub fn classify_branch(c: char) -> Option<Element> {
    BRANCH_TABLE
        .iter()
        .find(|(branch, _)| *branch == c)
        .map(|(_, element)| *element)
}

/// Classify free text by the element glyphs it contains.
///
/// Checked in the order 土 木 火 金 水; "兄弟子水" is Water, "官鬼戌土水" is Earth.
pub fn classify_text(text: &str) -> Option<Element> {
    TEXT_PRIORITY
        .into_iter()
        .find(|element| text.contains(element.glyph()))
}

/// Branch-mode classification of the character at `offset` (counted in chars).
pub fn classify_at(text: &str, offset: usize) -> Option<Element> {
    text.chars().nth(offset).and_then(classify_branch)
}

/// Which classifier a caller treats as authoritative for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ClassifyMode {
    /// Resolved branch glyph at a fixed character offset.
    Branch { offset: usize },
    /// Containment of the element glyphs themselves.
    Text,
}

impl ClassifyMode {
    /// Offset of the branch glyph in the backend's line layout ("兄弟子水━━━━━").
    pub const DEFAULT_OFFSET: usize = 2;

    pub fn classify(self, text: &str) -> Option<Element> {
        match self {
            ClassifyMode::Branch { offset } => classify_at(text, offset),
            ClassifyMode::Text => classify_text(text),
        }
    }
}

impl Default for ClassifyMode {
    fn default() -> Self {
        ClassifyMode::Branch {
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

impl FromStr for ClassifyMode {
    type Err = String;

    /// Accepts `text`, `branch` (default offset) or `branch:<offset>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(ClassifyMode::Text),
            "branch" => Ok(ClassifyMode::default()),
            other => {
                let offset = other
                    .strip_prefix("branch:")
                    .ok_or_else(|| format!("unknown classify mode: {other}"))?;
                offset
                    .parse()
                    .map(|offset| ClassifyMode::Branch { offset })
                    .map_err(|e| format!("invalid branch offset {offset:?}: {e}"))
            }
        }
    }
}
