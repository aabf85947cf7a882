//! Annotated answers: the parsed segments, source entries and heatmap tiles
//! derived from one `AnswerResult`.
//!
//! An `AnnotatedAnswer` is recomputed on every render and borrows from the
//! result it was built from. View state (selected tab, expanded or hovered
//! citation) is not part of it.

use crate::citations::{self, FrequencyTable};
use crate::heatmap::{self, HslColor, Legend};
use crate::models::{AnswerResult, CitationMetadata, Page, TextSegment};

use serde::Serialize;

// ============================================================================
// Annotation Types
// ============================================================================

/// One row of the source list. Ids cited in the text without metadata are
/// listed too, with `metadata: None`, so the list agrees with the frequency
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CitationEntry<'a> {
    pub id: &'a str,
    pub metadata: Option<&'a CitationMetadata>,
    pub count: usize,
}

impl<'a> CitationEntry<'a> {
    pub fn is_resolved(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn page(&self) -> Option<&'a Page> {
        self.metadata.map(|m| &m.page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatmapTile<'a> {
    pub id: &'a str,
    pub count: usize,
    pub color: HslColor,
    pub page: Option<&'a Page>,
    pub resolved: bool,
}

impl HeatmapTile<'_> {
    /// Hover text, e.g. `C1: 2 references`.
    pub fn title(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!("{}: {} reference{}", self.id, self.count, plural)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap<'a> {
    pub tiles: Vec<HeatmapTile<'a>>,
    pub max_frequency: usize,
    pub legend: Legend,
}

impl Heatmap<'_> {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedAnswer<'a> {
    pub segments: Vec<TextSegment<'a>>,
    pub entries: Vec<CitationEntry<'a>>,
    pub heatmap: Heatmap<'a>,
    pub frequencies: FrequencyTable<'a>,
    pub unresolved: Vec<&'a str>,
    pub context: &'a str,
}

impl AnnotatedAnswer<'_> {
    pub fn marker_count(&self) -> usize {
        self.frequencies.total()
    }

    pub fn entry(&self, id: &str) -> Option<&CitationEntry<'_>> {
        self.entries.iter().find(|e| e.id == id)
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Build every view of an answer from the result alone.
pub fn annotate(result: &AnswerResult) -> AnnotatedAnswer<'_> {
    let segments = citations::parse(&result.answer, &result.citations);
    let frequencies = FrequencyTable::from_segments(&segments);
    let unresolved = citations::unresolved_ids(&frequencies, &result.citations);

    let mut entries: Vec<CitationEntry<'_>> = result
        .citations
        .iter()
        .map(|(id, meta)| CitationEntry {
            id: id.as_str(),
            metadata: Some(meta),
            count: frequencies.get(id.as_str()),
        })
        .chain(unresolved.iter().map(|&id| CitationEntry {
            id,
            metadata: None,
            count: frequencies.get(id),
        }))
        .collect();
    entries.sort_by(|a, b| citations::compare_ids(a.id, b.id));

    let max_frequency = frequencies.max_frequency();
    let tiles = entries
        .iter()
        .map(|entry| HeatmapTile {
            id: entry.id,
            count: entry.count,
            color: heatmap::color_for(entry.count, max_frequency),
            page: entry.page(),
            resolved: entry.is_resolved(),
        })
        .collect();

    AnnotatedAnswer {
        segments,
        entries,
        heatmap: Heatmap {
            tiles,
            max_frequency,
            legend: Legend::new(max_frequency),
        },
        frequencies,
        unresolved,
        context: &result.context,
    }
}
