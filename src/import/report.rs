//! Import result reporter.
//!
//! Packages a finalized parse into the single caller-facing
//! [`ImportResult`]. Failures are fail-fast: the message names the first
//! problem encountered, on the expectation that malformed input is fixed
//! and re-submitted wholesale rather than patched field by field.

use chrono::Utc;
use tracing::info;

use crate::error::GuideError;

use super::types::{FlowSummary, ImportCounts, ImportResult, ParseOutcome};

/// Build the success report for a finalized draft tree.
///
/// Guaranteed: `flow_boxes_created == flows.len()` and `steps_created`
/// equals the sum of the per-flow step counts. Empty flows appear in
/// `flows` with a step count of zero.
#[must_use]
pub fn success(outcome: &ParseOutcome) -> ImportResult {
    let flows: Vec<FlowSummary> = outcome
        .flows
        .iter()
        .map(|flow| FlowSummary {
            name: flow.title.clone(),
            step_count: flow.steps.len(),
        })
        .collect();
    let steps_created = outcome.step_count();
    let flow_boxes_created = flows.len();

    info!(
        flow_boxes = flow_boxes_created,
        steps = steps_created,
        skipped = outcome.rows_skipped,
        "import parsed"
    );

    ImportResult {
        success: true,
        message: format!(
            "imported {flow_boxes_created} flow box(es) with {steps_created} step(s)"
        ),
        results: ImportCounts {
            flow_boxes_created,
            steps_created,
            rows_skipped: outcome.rows_skipped,
            flows,
        },
        imported_at: Utc::now(),
    }
}

/// Build the failure report: `success = false`, zero counts, and a message
/// naming the first failure.
#[must_use]
pub fn failure(error: &GuideError) -> ImportResult {
    ImportResult {
        success: false,
        message: error.to_string(),
        results: ImportCounts::default(),
        imported_at: Utc::now(),
    }
}
