//! Domain entities: cast entry and divination result

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::element::{classify_branch, Element};
use crate::domain::error::DomainError;

/// Number of line positions in one cast.
pub const CAST_LEN: usize = 6;

/// One cast position as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineValue {
    /// 0: old yin, moving
    OldYin,
    /// 1: young yang
    YoungYang,
    /// 2: young yin
    YoungYin,
    /// 3: old yang, moving
    OldYang,
}

impl LineValue {
    pub fn from_char(c: char) -> Result<Self, DomainError> {
        match c {
            '0' => Ok(LineValue::OldYin),
            '1' => Ok(LineValue::YoungYang),
            '2' => Ok(LineValue::YoungYin),
            '3' => Ok(LineValue::OldYang),
            other => Err(DomainError::InvalidLineValue(other)),
        }
    }

    pub fn digit(self) -> char {
        match self {
            LineValue::OldYin => '0',
            LineValue::YoungYang => '1',
            LineValue::YoungYin => '2',
            LineValue::OldYang => '3',
        }
    }

    /// Moving lines change polarity in the transformed hexagram.
    pub fn is_moving(self) -> bool {
        matches!(self, LineValue::OldYin | LineValue::OldYang)
    }

    pub fn is_yang(self) -> bool {
        matches!(self, LineValue::YoungYang | LineValue::OldYang)
    }

    /// Line drawing as the backend prints it.
    pub fn stroke(self) -> &'static str {
        if self.is_yang() {
            "━━━━━"
        } else {
            "━━ ━━"
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineValue::OldYin => "老阴",
            LineValue::YoungYang => "少阳",
            LineValue::YoungYin => "少阴",
            LineValue::OldYang => "老阳",
        }
    }
}

/// A validated six-position entry, bottom line first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastInput {
    raw: String,
    values: [LineValue; CAST_LEN],
}

impl CastInput {
    /// Validate a raw entry: exactly six characters, each 0-3.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let count = raw.chars().count();
        if count != CAST_LEN {
            return Err(DomainError::invalid_input(
                raw,
                format!("expected {CAST_LEN} characters, got {count}"),
            ));
        }
        let mut values = [LineValue::YoungYang; CAST_LEN];
        for (slot, c) in values.iter_mut().zip(raw.chars()) {
            *slot = LineValue::from_char(c)
                .map_err(|e| DomainError::invalid_input(raw, e.to_string()))?;
        }
        Ok(Self {
            raw: raw.to_string(),
            values,
        })
    }

    /// The entry exactly as sent in the request body.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn values(&self) -> &[LineValue; CAST_LEN] {
        &self.values
    }

    pub fn moving_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_moving()).count()
    }
}

impl fmt::Display for CastInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Position marker on a line: 世 (world) or 应 (response).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    #[default]
    None,
    Shi,
    Ying,
}

impl LineRole {
    pub fn marker(self) -> Option<char> {
        match self {
            LineRole::None => None,
            LineRole::Shi => Some('世'),
            LineRole::Ying => Some('应'),
        }
    }

    pub fn from_marker(c: char) -> Option<LineRole> {
        match c {
            '世' => Some(LineRole::Shi),
            '应' => Some(LineRole::Ying),
            _ => None,
        }
    }

    /// Class name used on the rendered marker node.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            LineRole::None => None,
            LineRole::Shi => Some("shi"),
            LineRole::Ying => Some("ying"),
        }
    }
}

/// One row of a divination result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HexagramLine {
    /// Primary (正卦) text
    pub text: String,
    /// Transformed (变卦) text
    pub bian_text: String,
    pub role: LineRole,
    /// Relation annotation of the primary line
    pub relation: String,
    /// Relation annotation of the transformed line (may be empty)
    pub bian_relation: String,
}

impl HexagramLine {
    pub fn new(text: impl Into<String>, bian_text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bian_text: bian_text.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: LineRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = relation.into();
        self
    }

    pub fn with_bian_relation(mut self, relation: impl Into<String>) -> Self {
        self.bian_relation = relation.into();
        self
    }
}

/// Stem-branch (干支) strings for the moment of the cast.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GanzhiSet {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
}

impl GanzhiSet {
    pub fn new(
        year: impl Into<String>,
        month: impl Into<String>,
        day: impl Into<String>,
        hour: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
            hour: hour.into(),
        }
    }

    /// Fields in display order with their unit suffix.
    pub fn fields(&self) -> [(&str, char); 4] {
        [
            (self.year.as_str(), '年'),
            (self.month.as_str(), '月'),
            (self.day.as_str(), '日'),
            (self.hour.as_str(), '时'),
        ]
    }
}

/// Element of a stem-branch string, taken from its branch glyph (second char).
pub fn ganzhi_element(ganzhi: &str) -> Option<Element> {
    ganzhi.chars().nth(1).and_then(classify_branch)
}

/// A full result: index 0 is the hexagram-name row, then 初爻..上爻.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DivinationResult {
    pub ganzhi: GanzhiSet,
    pub lines: Vec<HexagramLine>,
}

impl DivinationResult {
    pub fn header(&self) -> Option<&HexagramLine> {
        self.lines.first()
    }

    /// Line rows in received order (bottom line first).
    pub fn line_rows(&self) -> &[HexagramLine] {
        self.lines.get(1..).unwrap_or(&[])
    }
}
