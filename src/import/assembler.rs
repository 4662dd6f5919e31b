//! Tree assembler: title validation and position assignment, shared by both
//! importers.
//!
//! Positions depend only on draft order and the base offset, so running the
//! assembler twice over the same drafts is idempotent.

use crate::error::{GuideError, Result};

use super::types::FlowBoxDraft;

/// Validate titles and assign ordering positions in place.
///
/// Flow boxes receive a contiguous increasing range starting at
/// `base_position` (the next free position in the target guide, so
/// re-imports append instead of colliding); each flow's steps restart at 1.
/// Titles are trimmed; a title that is empty after trimming fails the whole
/// import with [`GuideError::ValidationError`]. Flows with no steps are
/// left in place for the reporter to surface, never dropped.
pub fn assign_positions(flows: &mut [FlowBoxDraft], base_position: i64) -> Result<()> {
    for (flow_index, flow) in flows.iter_mut().enumerate() {
        flow.title = flow.title.trim().to_owned();
        if flow.title.is_empty() {
            return Err(GuideError::ValidationError(format!(
                "flow box {} has an empty title",
                flow_index + 1
            )));
        }
        flow.description = flow.description.trim().to_owned();
        flow.source_position = base_position + flow_index as i64;

        for (step_index, step) in flow.steps.iter_mut().enumerate() {
            step.title = step.title.trim().to_owned();
            if step.title.is_empty() {
                return Err(GuideError::ValidationError(format!(
                    "step {} in flow box '{}' has an empty title",
                    step_index + 1,
                    flow.title
                )));
            }
            step.source_position = 1 + step_index as i64;
        }
    }
    Ok(())
}
