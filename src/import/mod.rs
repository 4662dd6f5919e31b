//! Guide structure import pipeline.
//!
//! Converts two loosely-structured text formats into a validated, ordered
//! flow box / step tree ready for bulk insertion into a guide.
//!
//! # Architecture
//!
//! 1. **Reader** - splits raw text into logical records (CSV rows or
//!    numbered lines), with no domain meaning attached
//! 2. **Structural importers** - `csv` and `markdown` turn records into an
//!    ordered [`FlowBoxDraft`] sequence
//! 3. **Assembler** - validates titles and assigns sibling-unique positions
//!    starting at the caller-supplied base offset
//! 4. **Reporter** - packages counts and status into an [`ImportResult`]
//!
//! The pipeline is a pure, single-pass transform over an in-memory string:
//! no I/O, no shared state, safe to run per-request concurrently. Either
//! the whole input parses and a complete draft tree comes back, or the
//! first error is reported and nothing partial leaves the boundary.
//! Persisting the drafts is the storage collaborator's job.

pub mod assembler;
pub mod csv;
pub mod markdown;
pub mod reader;
pub mod report;
pub mod types;

use crate::error::Result;

pub use types::{
    FlowBoxDraft, FlowSummary, GuideImportRequest, ImportCounts, ImportFormat, ImportResult,
    ParseOutcome, StepDraft,
};

/// Parse a request into a finalized draft tree: importer, then assembler.
///
/// On error the partial tree is discarded; callers only ever see a complete
/// outcome or the first failure.
pub fn parse_request(request: &GuideImportRequest) -> Result<ParseOutcome> {
    let mut outcome = match request.format {
        ImportFormat::Csv => csv::parse(&request.raw_text)?,
        ImportFormat::Markdown => markdown::parse(&request.raw_text)?,
    };
    assembler::assign_positions(&mut outcome.flows, request.base_position)?;
    Ok(outcome)
}

/// Run the full pipeline and always come back with an [`ImportResult`].
///
/// Parse-stage failures (malformed input, structural, validation) are
/// folded into a `{success: false, message}` report per the import
/// boundary contract; the draft tree accompanies successful reports so the
/// caller can hand it to storage.
pub fn import_structure(request: &GuideImportRequest) -> (ImportResult, Option<ParseOutcome>) {
    match parse_request(request) {
        Ok(outcome) => {
            let result = report::success(&outcome);
            (result, Some(outcome))
        }
        Err(error) => (report::failure(&error), None),
    }
}
