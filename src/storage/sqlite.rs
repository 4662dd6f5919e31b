//! SQLite database layer.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::error::Result;
use crate::import::FlowBoxDraft;
use crate::storage::{
    FlowBoxId, FlowBoxRecord, GuideId, GuideRecord, GuideStore, StepId, StepRecord, persist,
};

/// SQLite wrapper for the guide content tree.
pub struct Database {
    conn: Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database at `path` and ensure the
    /// schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS guides (
                 id         INTEGER PRIMARY KEY AUTOINCREMENT,
                 title      TEXT NOT NULL,
                 created_at TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS flow_boxes (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 guide_id    INTEGER NOT NULL REFERENCES guides(id) ON DELETE CASCADE,
                 title       TEXT NOT NULL,
                 description TEXT NOT NULL DEFAULT '',
                 position    INTEGER NOT NULL,
                 UNIQUE (guide_id, position)
             );
             CREATE TABLE IF NOT EXISTS steps (
                 id          INTEGER PRIMARY KEY AUTOINCREMENT,
                 flow_box_id INTEGER NOT NULL REFERENCES flow_boxes(id) ON DELETE CASCADE,
                 title       TEXT NOT NULL,
                 content     TEXT NOT NULL DEFAULT '',
                 position    INTEGER NOT NULL,
                 UNIQUE (flow_box_id, position)
             );",
        )?;
        Ok(())
    }

    /// Persist a finalized import inside one transaction. A failure rolls
    /// everything back so the guide's existing content is untouched.
    pub fn persist_import(&mut self, guide_id: GuideId, flows: &[FlowBoxDraft]) -> Result<()> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match persist(self, guide_id, flows) {
            Ok(()) => {
                self.conn.execute_batch("COMMIT")?;
                debug!(guide_id, flows = flows.len(), "import persisted");
                Ok(())
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

fn guide_from_row(row: &Row<'_>) -> rusqlite::Result<GuideRecord> {
    Ok(GuideRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
    })
}

impl GuideStore for Database {
    fn create_guide(&mut self, title: &str) -> Result<GuideId> {
        self.conn.execute(
            "INSERT INTO guides (title, created_at) VALUES (?1, ?2)",
            params![title, Utc::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn guide(&self, guide_id: GuideId) -> Result<Option<GuideRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, title, created_at FROM guides WHERE id = ?1",
                params![guide_id],
                guide_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn list_guides(&self) -> Result<Vec<GuideRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at FROM guides ORDER BY id")?;
        let rows = stmt.query_map([], guide_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn next_flow_box_position(&self, guide_id: GuideId) -> Result<i64> {
        let max: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position), 0) FROM flow_boxes WHERE guide_id = ?1",
            params![guide_id],
            |row| row.get(0),
        )?;
        Ok(max + 1)
    }

    fn create_flow_box(
        &mut self,
        guide_id: GuideId,
        title: &str,
        description: &str,
        position: i64,
    ) -> Result<FlowBoxId> {
        self.conn.execute(
            "INSERT INTO flow_boxes (guide_id, title, description, position)
             VALUES (?1, ?2, ?3, ?4)",
            params![guide_id, title, description, position],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn create_step(
        &mut self,
        flow_box_id: FlowBoxId,
        title: &str,
        content: &str,
        position: i64,
    ) -> Result<StepId> {
        self.conn.execute(
            "INSERT INTO steps (flow_box_id, title, content, position)
             VALUES (?1, ?2, ?3, ?4)",
            params![flow_box_id, title, content, position],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn flow_boxes(&self, guide_id: GuideId) -> Result<Vec<FlowBoxRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, guide_id, title, description, position
             FROM flow_boxes WHERE guide_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![guide_id], |row| {
            Ok(FlowBoxRecord {
                id: row.get(0)?,
                guide_id: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                position: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn steps(&self, flow_box_id: FlowBoxId) -> Result<Vec<StepRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, flow_box_id, title, content, position
             FROM steps WHERE flow_box_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![flow_box_id], |row| {
            Ok(StepRecord {
                id: row.get(0)?,
                flow_box_id: row.get(1)?,
                title: row.get(2)?,
                content: row.get(3)?,
                position: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
