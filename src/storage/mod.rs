//! Persistence collaborator for the import pipeline.
//!
//! The parser never talks to storage; it hands a finalized draft tree to
//! [`persist`], which walks it in position order against the [`GuideStore`]
//! trait. [`sqlite::Database`] is the concrete store.

pub mod sqlite;

pub use sqlite::Database;

use crate::error::Result;
use crate::import::FlowBoxDraft;

/// Identifier of a persisted guide.
pub type GuideId = i64;
/// Identifier of a persisted flow box.
pub type FlowBoxId = i64;
/// Identifier of a persisted step.
pub type StepId = i64;

/// A persisted guide row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideRecord {
    pub id: GuideId,
    pub title: String,
    pub created_at: String,
}

/// A persisted flow box row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowBoxRecord {
    pub id: FlowBoxId,
    pub guide_id: GuideId,
    pub title: String,
    pub description: String,
    pub position: i64,
}

/// A persisted step row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub id: StepId,
    pub flow_box_id: FlowBoxId,
    pub title: String,
    pub content: String,
    pub position: i64,
}

/// Create/list surface the import pipeline and CLI consume.
pub trait GuideStore {
    fn create_guide(&mut self, title: &str) -> Result<GuideId>;

    fn guide(&self, guide_id: GuideId) -> Result<Option<GuideRecord>>;

    fn list_guides(&self) -> Result<Vec<GuideRecord>>;

    /// Next free flow box position in a guide; the assembler's base offset.
    fn next_flow_box_position(&self, guide_id: GuideId) -> Result<i64>;

    fn create_flow_box(
        &mut self,
        guide_id: GuideId,
        title: &str,
        description: &str,
        position: i64,
    ) -> Result<FlowBoxId>;

    fn create_step(
        &mut self,
        flow_box_id: FlowBoxId,
        title: &str,
        content: &str,
        position: i64,
    ) -> Result<StepId>;

    fn flow_boxes(&self, guide_id: GuideId) -> Result<Vec<FlowBoxRecord>>;

    fn steps(&self, flow_box_id: FlowBoxId) -> Result<Vec<StepRecord>>;
}

/// Materialize a finalized draft tree: one `create_flow_box` and one
/// `create_step` call per draft, in position order.
pub fn persist<S: GuideStore + ?Sized>(
    store: &mut S,
    guide_id: GuideId,
    flows: &[FlowBoxDraft],
) -> Result<()> {
    for flow in flows {
        let flow_box_id = store.create_flow_box(
            guide_id,
            &flow.title,
            &flow.description,
            flow.source_position,
        )?;
        for step in &flow.steps {
            store.create_step(flow_box_id, &step.title, &step.content, step.source_position)?;
        }
    }
    Ok(())
}
