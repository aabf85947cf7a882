//! Citation markers: scan answer text for `[C<n>]` tokens, split it into
//! plain/citation segments, tally marker frequency, and resolve ids against
//! the metadata returned with the answer.
//!
//! Everything here is a pure function of its inputs. Malformed markers are
//! never an error; they simply stay plain text.

use crate::models::{citation_number, CitationMap, CitationMetadata, TextSegment};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

#[cfg(test)]
#[path = "citations_test.rs"]
mod citations_test;

/// `[C` + ASCII digits + `]`. `\d` would also admit non-ASCII digits.
static MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[C[0-9]+\]").unwrap());

// ============================================================================
// Marker Scanning
// ============================================================================

/// A single marker match in some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    pub start: usize,
    pub end: usize,
    /// The matched token, brackets included.
    pub raw: &'a str,
    /// The token without its brackets.
    pub id: &'a str,
}

/// Non-overlapping markers in `text`, left to right.
pub fn markers(text: &str) -> impl Iterator<Item = Marker<'_>> + '_ {
    MARKER_RE.find_iter(text).map(|m| {
        let raw = m.as_str();
        Marker {
            start: m.start(),
            end: m.end(),
            raw,
            id: &raw[1..raw.len() - 1],
        }
    })
}

// ============================================================================
// Segmentation
// ============================================================================

/// Split `text` into alternating plain-text and citation-marker segments.
///
/// Concatenating the segments' text reproduces `text` exactly. Empty input
/// yields no segments; input without markers yields a single plain segment.
pub fn parse<'a>(text: &'a str, metadata: &CitationMap) -> Vec<TextSegment<'a>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for marker in markers(text) {
        if marker.start > last {
            segments.push(TextSegment::PlainText {
                content: &text[last..marker.start],
            });
        }
        segments.push(TextSegment::CitationMarker {
            raw: marker.raw,
            id: marker.id,
            resolved: is_resolved(marker.id, metadata),
        });
        last = marker.end;
    }

    if last < text.len() {
        segments.push(TextSegment::PlainText {
            content: &text[last..],
        });
    }

    segments
}

// ============================================================================
// Frequency
// ============================================================================

/// Occurrence count per citation id within one answer.
///
/// Only ids that actually occur are stored; [`FrequencyTable::get`] reports 0
/// for anything else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable<'a> {
    counts: HashMap<&'a str, usize>,
}

impl<'a> FrequencyTable<'a> {
    /// Tally the marker segments of an already parsed answer.
    pub fn from_segments(segments: &[TextSegment<'a>]) -> Self {
        let mut table = Self::default();
        for id in segments.iter().filter_map(|s| s.citation_id()) {
            table.record(id);
        }
        table
    }

    fn record(&mut self, id: &'a str) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    pub fn get(&self, id: &str) -> usize {
        self.counts.get(id).copied().unwrap_or(0)
    }

    /// Largest count, floored at 1 so it is always safe to divide by.
    pub fn max_frequency(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0).max(1)
    }

    /// Total number of markers counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.counts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.counts.iter().map(|(id, n)| (*id, *n))
    }
}

impl Serialize for FrequencyTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Sorted so the JSON is stable across runs.
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| compare_ids(a.0, b.0));
        serializer.collect_map(entries)
    }
}

/// Count every marker in `text`, whether or not its id has metadata.
pub fn aggregate(text: &str) -> FrequencyTable<'_> {
    let mut table = FrequencyTable::default();
    for marker in markers(text) {
        table.record(marker.id);
    }
    table
}

// ============================================================================
// Resolution
// ============================================================================

/// Exact lookup of an id in the metadata mapping. No case folding.
pub fn resolve<'m>(id: &str, metadata: &'m CitationMap) -> Option<&'m CitationMetadata> {
    metadata.get(id)
}

pub fn is_resolved(id: &str, metadata: &CitationMap) -> bool {
    resolve(id, metadata).is_some()
}

/// Presentation order of citation ids: numeric by the `C<n>` suffix, with
/// non-canonical ids after all canonical ones. Ties (e.g. `C1` / `C01`, or two
/// non-canonical ids) fall back to the raw string, so the order is total.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (citation_number(a), citation_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Metadata entries in presentation order.
pub fn sorted_entries(metadata: &CitationMap) -> Vec<(&str, &CitationMetadata)> {
    let mut entries: Vec<_> = metadata
        .iter()
        .map(|(id, meta)| (id.as_str(), meta))
        .collect();
    entries.sort_by(|a, b| compare_ids(a.0, b.0));
    entries
}

/// Ids cited in the text that have no metadata, in presentation order.
pub fn unresolved_ids<'a>(frequencies: &FrequencyTable<'a>, metadata: &CitationMap) -> Vec<&'a str> {
    let mut ids: Vec<_> = frequencies
        .ids()
        .filter(|id| !is_resolved(id, metadata))
        .collect();
    ids.sort_by(|a, b| compare_ids(a, b));
    ids
}
