//! JSON contract of the `/generate_gua_xian` endpoint
//!
//! `gua_lines` is the canonical line format. `gua_xian` (tab-separated
//! primary/transformed strings) is decoded as a fallback.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DivinationResult, GanzhiSet, HexagramLine, LineRole};

/// Path of the generation endpoint, relative to the configured server.
pub const GENERATE_PATH: &str = "/generate_gua_xian";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuaRequest {
    pub numbers: String,
}

/// Structured line record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLine {
    pub text: String,
    #[serde(default)]
    pub bian_text: String,
    #[serde(default)]
    pub role: Option<LineRole>,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub bian_relation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuaResponse {
    pub year_ganzhi: String,
    pub month_ganzhi: String,
    pub day_ganzhi: String,
    pub hour_ganzhi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gua_lines: Option<Vec<WireLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gua_xian: Option<Vec<String>>,
}

impl From<WireLine> for HexagramLine {
    fn from(line: WireLine) -> Self {
        HexagramLine {
            text: line.text,
            bian_text: line.bian_text,
            role: line.role.unwrap_or_default(),
            relation: line.relation,
            bian_relation: line.bian_relation,
        }
    }
}

/// Decode one legacy `gua_xian` entry: `"primary\ttransformed"`.
///
/// A trailing ` 世` / ` 应` on the primary text becomes the line role.
pub fn decode_legacy_line(entry: &str) -> HexagramLine {
    let (primary, transformed) = entry.split_once('\t').unwrap_or((entry, ""));
    let (text, role) = split_role_suffix(primary);
    HexagramLine::new(text, transformed).with_role(role)
}

fn split_role_suffix(text: &str) -> (&str, LineRole) {
    let trimmed = text.trim_end();
    if let Some(last) = trimmed.chars().last() {
        if let Some(role) = LineRole::from_marker(last) {
            let rest = &trimmed[..trimmed.len() - last.len_utf8()];
            if rest.ends_with(' ') {
                return (rest.trim_end(), role);
            }
        }
    }
    (text, LineRole::None)
}

impl GuaResponse {
    pub fn ganzhi(&self) -> GanzhiSet {
        GanzhiSet::new(
            self.year_ganzhi.as_str(),
            self.month_ganzhi.as_str(),
            self.day_ganzhi.as_str(),
            self.hour_ganzhi.as_str(),
        )
    }

    /// Convert to a domain result; `gua_lines` wins over `gua_xian`.
    pub fn into_result(self) -> ApplicationResult<DivinationResult> {
        let ganzhi = self.ganzhi();
        let lines: Vec<HexagramLine> = match (self.gua_lines, self.gua_xian) {
            (Some(lines), _) => lines.into_iter().map(HexagramLine::from).collect(),
            (None, Some(legacy)) => legacy
                .iter()
                .map(String::as_str)
                .map(decode_legacy_line)
                .collect(),
            (None, None) => {
                return Err(ApplicationError::Decode {
                    message: "response has neither gua_lines nor gua_xian".to_string(),
                })
            }
        };
        Ok(DivinationResult { ganzhi, lines })
    }
}

/// Parse a response body into a domain result.
pub fn decode_body(body: &str) -> ApplicationResult<DivinationResult> {
    let response: GuaResponse =
        serde_json::from_str(body).map_err(|e| ApplicationError::Decode {
            message: e.to_string(),
        })?;
    response.into_result()
}
