//! Markdown structural importer.
//!
//! Scans line by line and recognizes three line classes: a flow box heading
//! (`## ` + non-empty title), a step heading (`### ` + non-empty title), and
//! content (anything else, accumulated verbatim into the open step). The
//! scanner is the three-state machine Seeking / InFlow / InStep, encoded
//! here as which of the current flow and current step are open; the only
//! lookahead is one line, to capture an italic description immediately
//! after a flow heading.
//!
//! Not a markdown renderer: headings deeper than `###` and every other
//! construct are plain content.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{GuideError, Result};

use super::reader::numbered_lines;
use super::types::{FlowBoxDraft, ParseOutcome, StepDraft};

/// A whole line wrapped in a single leading and trailing `*`, with no other
/// `*` characters: the flow description convention.
static ITALIC_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*([^*]+)\*$").unwrap_or_else(|e| panic!("italic regex: {e}")));

/// The rest of `line` after `prefix`, if the line is that kind of heading.
fn heading<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)
}

/// Description text if `line` is an italic one-liner.
fn italic_text(line: &str) -> Option<&str> {
    ITALIC_LINE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Join accumulated content lines, trimming leading and trailing blank
/// lines but preserving interior formatting verbatim.
fn assemble_content(buffer: &[&str]) -> String {
    let start = buffer
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(buffer.len());
    let end = buffer
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(start, |i| i + 1);
    buffer[start..end].join("\n")
}

/// Parse raw markdown text into an ordered flow box draft sequence.
///
/// An orphan step heading (before any flow heading) rejects the whole
/// import: guessing the intended parent risks corrupting guide structure.
/// Content before the first heading is discarded. At end of input the open
/// step closes first, then the open flow, so the final block is never
/// dropped.
pub fn parse(raw_text: &str) -> Result<ParseOutcome> {
    if raw_text.trim().is_empty() {
        return Err(GuideError::MalformedInput(
            "empty input: no markdown content".into(),
        ));
    }

    let mut flows: Vec<FlowBoxDraft> = Vec::new();
    let mut current_flow: Option<FlowBoxDraft> = None;
    let mut current_step: Option<StepDraft> = None;
    let mut buffer: Vec<&str> = Vec::new();

    let close_step = |flow: &mut Option<FlowBoxDraft>,
                      step: &mut Option<StepDraft>,
                      buffer: &mut Vec<&str>| {
        if let Some(mut done) = step.take() {
            done.content = assemble_content(buffer);
            if let Some(flow) = flow.as_mut() {
                flow.steps.push(done);
            }
        }
        buffer.clear();
    };

    let mut lines = numbered_lines(raw_text).peekable();
    while let Some((line_no, line)) = lines.next() {
        if let Some(rest) = heading(line, "### ") {
            let title = rest.trim();
            if title.is_empty() {
                return Err(GuideError::ValidationError(format!(
                    "step heading with empty title at line {line_no}"
                )));
            }
            if current_flow.is_none() {
                return Err(GuideError::StructuralError(format!(
                    "orphan step heading '{title}' at line {line_no}: no flow box heading precedes it"
                )));
            }
            close_step(&mut current_flow, &mut current_step, &mut buffer);
            current_step = Some(StepDraft::new(title, ""));
        } else if let Some(rest) = heading(line, "## ") {
            let title = rest.trim();
            if title.is_empty() {
                return Err(GuideError::ValidationError(format!(
                    "flow box heading with empty title at line {line_no}"
                )));
            }
            close_step(&mut current_flow, &mut current_step, &mut buffer);
            if let Some(done) = current_flow.take() {
                flows.push(done);
            }

            // One-line lookahead: an italic line right after the heading is
            // the flow's description. A step heading never matches, so the
            // lookahead cannot swallow one.
            let description = lines
                .peek()
                .and_then(|&(_, next)| italic_text(next))
                .map(str::to_owned);
            if description.is_some() {
                lines.next();
            }
            current_flow = Some(FlowBoxDraft::new(title, description.unwrap_or_default()));
        } else if current_step.is_some() {
            buffer.push(line);
        } else {
            // Content with no open step has no home: either pre-heading
            // text or stray lines between a flow heading and its first
            // step. Both are dropped.
            if !line.trim().is_empty() {
                debug!(line = line_no, "discarding content outside any step");
            }
        }
    }

    close_step(&mut current_flow, &mut current_step, &mut buffer);
    if let Some(done) = current_flow.take() {
        flows.push(done);
    }

    Ok(ParseOutcome {
        flows,
        rows_skipped: 0,
    })
}
