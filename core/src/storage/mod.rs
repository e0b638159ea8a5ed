//! Storage port for parsed workbooks.
//!
//! The parsing core does not care how workbooks are persisted; it requires
//! only this port. Deleting a scrim id must cascade across every event
//! table — once deleted, loads for that id return an empty workbook.

pub mod sqlite;

pub use sqlite::SqliteEventStore;

use thiserror::Error;

use crate::workbook::MatchWorkbook;

pub trait EventStore {
    /// Persist a workbook under a scrim id. Saving an id twice is an error;
    /// delete first to replace.
    fn save(&mut self, scrim_id: i64, workbook: &MatchWorkbook) -> Result<(), StorageError>;

    /// Load the workbook for a scrim id. Unknown (or deleted) ids load as an
    /// empty workbook, not an error.
    fn load(&self, scrim_id: i64) -> Result<MatchWorkbook, StorageError>;

    /// Remove a scrim and, by cascade, its rows in every event table.
    /// Deleting an unknown id is a no-op.
    fn delete(&mut self, scrim_id: i64) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("scrim {0} already exists")]
    ScrimAlreadyExists(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
