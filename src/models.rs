//! Data models for the evidence viewer.
//!
//! This module contains the citation data model shared by the annotation
//! engine, plus the wire types exchanged with the answering service.

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Citation Identifiers
// ============================================================================

/// Identifier of a citation within one answer, canonically `C<n>` (e.g. `C3`).
///
/// Equality and hashing are those of the raw string, so a `CitationMap` can be
/// queried with the `&str` ids the parser produces. Presentation order is not
/// lexicographic; see [`CitationId::number`] and `citations::compare_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationId(String);

impl CitationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer suffix of a canonical `C<digits>` id.
    pub fn number(&self) -> Option<u64> {
        citation_number(&self.0)
    }
}

/// Integer suffix of `C<digits>`; `None` for anything else (including
/// suffixes too large for a u64).
pub fn citation_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix('C')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl Borrow<str> for CitationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CitationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ============================================================================
// Citation Metadata
// ============================================================================

/// Page reference of a cited chunk. The backend sends an integer, but its
/// model also admits free-form strings.
///
/// Decoding never fails: a missing, null or otherwise unusable page becomes
/// `Unknown`, so one bad record does not discard the whole answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Page {
    Number(i64),
    Label(String),
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for Page {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(n) => Page::Number(n),
                None => Page::Label(n.to_string()),
            },
            serde_json::Value::String(s) => Page::Label(s),
            _ => Page::Unknown,
        })
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Number(n) => write!(f, "{}", n),
            Page::Label(s) => f.write_str(s),
            Page::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMetadata {
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_id: Option<String>,
}

pub type CitationMap = HashMap<CitationId, CitationMetadata>;

// ============================================================================
// Text Segments
// ============================================================================

/// One run of an answer: either verbatim text or a citation marker.
/// Both variants borrow from the answer text they were parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextSegment<'a> {
    PlainText {
        content: &'a str,
    },
    CitationMarker {
        raw: &'a str,
        id: &'a str,
        resolved: bool,
    },
}

impl<'a> TextSegment<'a> {
    /// The exact slice of the original text this segment covers.
    pub fn text(&self) -> &'a str {
        match self {
            TextSegment::PlainText { content } => content,
            TextSegment::CitationMarker { raw, .. } => raw,
        }
    }

    pub fn citation_id(&self) -> Option<&'a str> {
        match self {
            TextSegment::CitationMarker { id, .. } => Some(id),
            TextSegment::PlainText { .. } => None,
        }
    }

    pub fn is_citation(&self) -> bool {
        matches!(self, TextSegment::CitationMarker { .. })
    }
}

// ============================================================================
// Answering Service Payloads
// ============================================================================

/// Full response of `POST /qa`. Held by the interface for one query/answer
/// cycle and replaced wholesale by the next answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub citations: CitationMap,
    #[serde(default)]
    pub context: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<CitationMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<CitationMap>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaRequest {
    pub query: String,
    #[serde(default)]
    pub top_k: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRequest {
    pub file_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_indexed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_number() {
        assert_eq!(citation_number("C1"), Some(1));
        assert_eq!(citation_number("C010"), Some(10));
        assert_eq!(citation_number("C"), None);
        assert_eq!(citation_number("c1"), None);
        assert_eq!(citation_number("C1a"), None);
        assert_eq!(citation_number("C+1"), None);
        assert_eq!(citation_number("chunk-7"), None);
        assert_eq!(citation_number("C99999999999999999999999"), None);
    }

    #[test]
    fn test_answer_result_null_citations() {
        let json = r#"{"answer": "text [C1]", "citations": null, "context": "ctx"}"#;
        let result: AnswerResult = serde_json::from_str(json).unwrap();
        assert!(result.citations.is_empty());
        assert_eq!(result.context, "ctx");
    }

    #[test]
    fn test_answer_result_absent_fields() {
        let result: AnswerResult = serde_json::from_str(r#"{"answer": "hi"}"#).unwrap();
        assert_eq!(result.answer, "hi");
        assert!(result.citations.is_empty());
        assert_eq!(result.context, "");
    }

    #[test]
    fn test_metadata_page_number_or_label() {
        let json = r#"{
            "answer": "",
            "citations": {
                "C1": {"chunk_id": "C1", "page": 4, "snippet": "s", "source": "a.pdf"},
                "C2": {"page": "iv", "snippet": "t", "source": "b.pdf"}
            }
        }"#;
        let result: AnswerResult = serde_json::from_str(json).unwrap();
        let c1 = &result.citations["C1"];
        assert_eq!(c1.page, Page::Number(4));
        assert_eq!(c1.chunk_id.as_deref(), Some("C1"));
        assert_eq!(result.citations["C2"].page, Page::Label("iv".to_string()));
        assert_eq!(result.citations["C2"].page.to_string(), "iv");
    }

    #[test]
    fn test_odd_pages_keep_the_answer() {
        let json = r#"{
            "answer": "[C1] [C2] [C3] [C4] [C5]",
            "citations": {
                "C1": {"page": -1, "source": "a.pdf", "snippet": "s"},
                "C2": {"source": "b.pdf", "snippet": "t"},
                "C3": {"page": null, "source": "c.pdf"},
                "C4": {"page": 2.5, "source": "d.pdf"},
                "C5": {"page": {"from": 1}, "source": "e.pdf"}
            }
        }"#;
        let result: AnswerResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.citations.len(), 5);
        assert_eq!(result.citations["C1"].page, Page::Number(-1));
        assert_eq!(result.citations["C2"].page, Page::Unknown);
        assert_eq!(result.citations["C2"].source, "b.pdf");
        assert_eq!(result.citations["C3"].page, Page::Unknown);
        assert_eq!(result.citations["C4"].page, Page::Label("2.5".to_string()));
        assert_eq!(result.citations["C5"].page, Page::Unknown);
        assert_eq!(result.citations["C5"].page.to_string(), "?");
        assert_eq!(serde_json::to_value(&Page::Unknown).unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn test_segment_serializes_tagged() {
        let seg = TextSegment::CitationMarker {
            raw: "[C2]",
            id: "C2",
            resolved: false,
        };
        let value = serde_json::to_value(seg).unwrap();
        assert_eq!(value["type"], "citation_marker");
        assert_eq!(value["id"], "C2");
        assert_eq!(value["resolved"], false);
    }
}
