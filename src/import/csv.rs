//! CSV structural importer.
//!
//! Interprets rows with columns {Flow Name, Flow Description, Step Title,
//! Content} into a flow box / step tree. Columns are matched by header name
//! (case-insensitive, trimmed); column order is irrelevant. Grouping is
//! append-on-change: whenever a row's Flow Name differs from the flow
//! currently open, a new flow box is opened — two non-adjacent blocks with
//! the same name become two separate flow boxes, never merged, because
//! collapsing them would silently reorder steps.

use tracing::warn;

use crate::error::{GuideError, Result};

use super::reader::{CsvReader, CsvRecord};
use super::types::{FlowBoxDraft, ParseOutcome, StepDraft};

const COL_FLOW_NAME: &str = "flow name";
const COL_FLOW_DESCRIPTION: &str = "flow description";
const COL_STEP_TITLE: &str = "step title";
const COL_CONTENT: &str = "content";

/// Column-name to index mapping built from the header row.
#[derive(Debug, Clone, Copy)]
struct HeaderMap {
    flow_name: usize,
    flow_description: usize,
    step_title: usize,
    content: usize,
}

impl HeaderMap {
    fn from_record(header: &CsvRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            header
                .fields
                .iter()
                .position(|f| f.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    GuideError::MalformedInput(format!("missing required column '{name}'"))
                })
        };
        Ok(Self {
            flow_name: find(COL_FLOW_NAME)?,
            flow_description: find(COL_FLOW_DESCRIPTION)?,
            step_title: find(COL_STEP_TITLE)?,
            content: find(COL_CONTENT)?,
        })
    }
}

/// A row shorter than the header reads as empty strings for the missing
/// columns.
fn field<'a>(record: &'a CsvRecord, index: usize) -> &'a str {
    record.fields.get(index).map_or("", String::as_str)
}

/// Parse raw CSV text into an ordered flow box draft sequence.
///
/// The first record is the header. Rows whose Step Title is empty after
/// trimming are skipped entirely (logged and tallied, not errors) so stray
/// blank rows do not abort an import. Entirely empty input fails with
/// [`GuideError::MalformedInput`].
pub fn parse(raw_text: &str) -> Result<ParseOutcome> {
    let mut records = CsvReader::new(raw_text);

    let header = match records.next() {
        Some(record) => record?,
        None => {
            return Err(GuideError::MalformedInput(
                "empty input: expected a CSV header row".into(),
            ));
        }
    };
    let columns = HeaderMap::from_record(&header)?;

    let mut outcome = ParseOutcome::default();
    let mut current: Option<FlowBoxDraft> = None;

    for record in records {
        let record = record?;

        let step_title = field(&record, columns.step_title).trim();
        if step_title.is_empty() {
            warn!(line = record.line, "skipping row with empty step title");
            outcome.rows_skipped += 1;
            continue;
        }

        let flow_name = field(&record, columns.flow_name).trim();
        let open_name = current.as_ref().map(|flow| flow.title.as_str());
        if open_name != Some(flow_name) {
            if let Some(done) = current.take() {
                outcome.flows.push(done);
            }
            // First occurrence wins for the description; later rows in the
            // same block may leave the column blank and inherit nothing.
            let description = field(&record, columns.flow_description).trim();
            current = Some(FlowBoxDraft::new(flow_name, description));
        }

        let content = field(&record, columns.content);
        if let Some(flow) = current.as_mut() {
            flow.steps.push(StepDraft::new(step_title, content));
        }
    }

    if let Some(done) = current.take() {
        outcome.flows.push(done);
    }

    Ok(outcome)
}
