//! Data model for the guide structure import pipeline.
//!
//! Drafts are the in-memory, not-yet-persisted representation produced by
//! the importers. Ownership is strictly by containment: a `FlowBoxDraft`
//! owns its `StepDraft`s, and nothing holds back-references. The whole
//! pipeline is a pure transform from text to an [`ImportResult`]; the only
//! side effects happen later, in storage.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported import formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    /// Delimited rows with a header naming Flow Name, Flow Description,
    /// Step Title and Content columns.
    Csv,
    /// Two-level heading convention: `##` opens a flow box, `###` a step.
    Markdown,
}

impl ImportFormat {
    /// Guess the format from a file extension. Returns `None` for anything
    /// other than `.csv`, `.md` or `.markdown`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// One import call: raw text plus the guide it targets. Ephemeral,
/// constructed per request and discarded after processing.
#[derive(Debug, Clone)]
pub struct GuideImportRequest {
    /// Target guide identifier.
    pub guide_id: i64,
    /// Input format.
    pub format: ImportFormat,
    /// Raw input text.
    pub raw_text: String,
    /// Next free flow box position in the target guide, so re-imports
    /// append rather than collide with existing positions.
    pub base_position: i64,
}

/// A not-yet-persisted step: the leaf content unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDraft {
    /// Step title, non-empty after trimming.
    pub title: String,
    /// Markdown-formatted body, possibly empty.
    pub content: String,
    /// Ordering key among siblings, assigned by the assembler.
    pub source_position: i64,
}

impl StepDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source_position: 0,
        }
    }
}

/// A not-yet-persisted flow box: a named, ordered group of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowBoxDraft {
    /// Flow box title, non-empty after trimming.
    pub title: String,
    /// Human-readable summary, possibly empty.
    pub description: String,
    /// Steps in display order.
    pub steps: Vec<StepDraft>,
    /// Ordering key among the guide's flow boxes, assigned by the assembler.
    pub source_position: i64,
}

impl FlowBoxDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            steps: Vec::new(),
            source_position: 0,
        }
    }
}

/// Everything a single parse pass produced: the draft tree plus bookkeeping
/// the reporter surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Flow boxes in input order.
    pub flows: Vec<FlowBoxDraft>,
    /// Data rows dropped for having an empty step title (CSV only).
    pub rows_skipped: usize,
}

impl ParseOutcome {
    /// Total steps across all flows.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.flows.iter().map(|f| f.steps.len()).sum()
    }
}

/// Per-flow entry in the import report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub name: String,
    pub step_count: usize,
}

/// Counts nested under `results` in the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCounts {
    pub flow_boxes_created: usize,
    pub steps_created: usize,
    pub rows_skipped: usize,
    pub flows: Vec<FlowSummary>,
}

/// Outcome of one import call. Immutable after construction.
///
/// Serializes to the caller-facing shape:
///
/// ```json
/// { "success": true, "message": "...",
///   "results": { "flowBoxesCreated": 1, "stepsCreated": 3,
///                "rowsSkipped": 0,
///                "flows": [ { "name": "Setup", "stepCount": 3 } ] },
///   "importedAt": "2026-01-01T00:00:00Z" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub results: ImportCounts,
    pub imported_at: DateTime<Utc>,
}
