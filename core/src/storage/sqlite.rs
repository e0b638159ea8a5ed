//! SQLite adapter for the storage port.
//!
//! Schema: a `scrims` table plus one table per event kind, each row a JSON
//! payload keyed by `(scrim_id, seq)` with an `ON DELETE CASCADE` foreign
//! key back to `scrims`. The cascade is what implements the delete contract.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, Transaction, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{EventStore, StorageError};
use crate::combat_log::EventKind;
use crate::workbook::MatchWorkbook;

pub struct SqliteEventStore {
    conn: Connection,
}

impl SqliteEventStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        // SQLite does not enforce foreign keys unless asked.
        conn.pragma_update(None, "foreign_keys", true)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS scrims (
                id INTEGER PRIMARY KEY,
                saved_at TEXT NOT NULL
            );",
        )?;
        for kind in EventKind::ALL {
            self.conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    scrim_id INTEGER NOT NULL REFERENCES scrims(id) ON DELETE CASCADE,
                    seq INTEGER NOT NULL,
                    data TEXT NOT NULL,
                    PRIMARY KEY (scrim_id, seq)
                );",
                table = kind.tag()
            ))?;
        }
        Ok(())
    }

    pub fn scrim_ids(&self) -> Result<Vec<i64>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT id FROM scrims ORDER BY id")?;
        let mut rows = stmt.query([])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(row.get(0)?);
        }
        Ok(ids)
    }
}

fn insert_rows<T: Serialize>(
    tx: &Transaction<'_>,
    table: &str,
    scrim_id: i64,
    rows: &[T],
) -> Result<(), StorageError> {
    if rows.is_empty() {
        return Ok(());
    }
    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {table} (scrim_id, seq, data) VALUES (?1, ?2, ?3)"
    ))?;
    for (seq, row) in rows.iter().enumerate() {
        stmt.execute(params![scrim_id, seq as i64, serde_json::to_string(row)?])?;
    }
    Ok(())
}

fn load_rows<T: DeserializeOwned>(
    conn: &Connection,
    table: &str,
    scrim_id: i64,
) -> Result<Vec<T>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT data FROM {table} WHERE scrim_id = ?1 ORDER BY seq"
    ))?;
    let mut rows = stmt.query(params![scrim_id])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let data: String = row.get(0)?;
        out.push(serde_json::from_str(&data)?);
    }
    Ok(out)
}

impl EventStore for SqliteEventStore {
    fn save(&mut self, scrim_id: i64, workbook: &MatchWorkbook) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM scrims WHERE id = ?1)",
            params![scrim_id],
            |row| row.get(0),
        )?;
        if exists {
            return Err(StorageError::ScrimAlreadyExists(scrim_id));
        }
        tx.execute(
            "INSERT INTO scrims (id, saved_at) VALUES (?1, ?2)",
            params![scrim_id, Utc::now().to_rfc3339()],
        )?;

        insert_rows(&tx, "match_start", scrim_id, &workbook.match_start)?;
        insert_rows(&tx, "match_end", scrim_id, &workbook.match_end)?;
        insert_rows(&tx, "round_start", scrim_id, &workbook.round_start)?;
        insert_rows(&tx, "round_end", scrim_id, &workbook.round_end)?;
        insert_rows(&tx, "setup_complete", scrim_id, &workbook.setup_complete)?;
        insert_rows(&tx, "objective_captured", scrim_id, &workbook.objective_captured)?;
        insert_rows(&tx, "objective_updated", scrim_id, &workbook.objective_updated)?;
        insert_rows(&tx, "point_progress", scrim_id, &workbook.point_progress)?;
        insert_rows(&tx, "payload_progress", scrim_id, &workbook.payload_progress)?;
        insert_rows(&tx, "player_stat", scrim_id, &workbook.player_stat)?;
        insert_rows(&tx, "kill", scrim_id, &workbook.kill)?;
        insert_rows(&tx, "defensive_assist", scrim_id, &workbook.defensive_assist)?;
        insert_rows(&tx, "offensive_assist", scrim_id, &workbook.offensive_assist)?;
        insert_rows(&tx, "hero_spawn", scrim_id, &workbook.hero_spawn)?;
        insert_rows(&tx, "hero_swap", scrim_id, &workbook.hero_swap)?;
        insert_rows(&tx, "ultimate_charged", scrim_id, &workbook.ultimate_charged)?;
        insert_rows(&tx, "ultimate_start", scrim_id, &workbook.ultimate_start)?;
        insert_rows(&tx, "ultimate_end", scrim_id, &workbook.ultimate_end)?;

        tx.commit()?;
        debug!(scrim_id, records = workbook.len(), "saved workbook");
        Ok(())
    }

    fn load(&self, scrim_id: i64) -> Result<MatchWorkbook, StorageError> {
        Ok(MatchWorkbook {
            match_start: load_rows(&self.conn, "match_start", scrim_id)?,
            match_end: load_rows(&self.conn, "match_end", scrim_id)?,
            round_start: load_rows(&self.conn, "round_start", scrim_id)?,
            round_end: load_rows(&self.conn, "round_end", scrim_id)?,
            setup_complete: load_rows(&self.conn, "setup_complete", scrim_id)?,
            objective_captured: load_rows(&self.conn, "objective_captured", scrim_id)?,
            objective_updated: load_rows(&self.conn, "objective_updated", scrim_id)?,
            point_progress: load_rows(&self.conn, "point_progress", scrim_id)?,
            payload_progress: load_rows(&self.conn, "payload_progress", scrim_id)?,
            player_stat: load_rows(&self.conn, "player_stat", scrim_id)?,
            kill: load_rows(&self.conn, "kill", scrim_id)?,
            defensive_assist: load_rows(&self.conn, "defensive_assist", scrim_id)?,
            offensive_assist: load_rows(&self.conn, "offensive_assist", scrim_id)?,
            hero_spawn: load_rows(&self.conn, "hero_spawn", scrim_id)?,
            hero_swap: load_rows(&self.conn, "hero_swap", scrim_id)?,
            ultimate_charged: load_rows(&self.conn, "ultimate_charged", scrim_id)?,
            ultimate_start: load_rows(&self.conn, "ultimate_start", scrim_id)?,
            ultimate_end: load_rows(&self.conn, "ultimate_end", scrim_id)?,
        })
    }

    fn delete(&mut self, scrim_id: i64) -> Result<(), StorageError> {
        // Event tables cascade from the scrims row.
        let deleted = self
            .conn
            .execute("DELETE FROM scrims WHERE id = ?1", params![scrim_id])?;
        debug!(scrim_id, deleted, "deleted scrim");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::EventKind;
    use crate::parser::LogParser;

    fn sample_workbook() -> MatchWorkbook {
        let text = "\
0;match_start;Midtown;Hybrid;Team Alpha;Team Bravo\n\
0.5;round_start;1;All;0;0;0\n\
10;ultimate_charged;Team Alpha;Ana Main;Ana;0;1\n\
25;ultimate_start;Team Alpha;Ana Main;Ana;0;1\n\
30;kill;Team Alpha;Ana Main;Ana;Team Bravo;Flanker;Genji;Sleep Dart;5;0;0\n\
31;defensive_assist;Team Alpha;Ana Main;Ana;0\n\
99;match_end;1;1;0\n";
        LogParser::parse_str(text).workbook
    }

    #[test]
    fn save_then_load_roundtrips_field_for_field() {
        let mut store = SqliteEventStore::open_in_memory().unwrap();
        let workbook = sample_workbook();
        store.save(7, &workbook).unwrap();
        let loaded = store.load(7).unwrap();
        assert_eq!(loaded, workbook);
    }

    #[test]
    fn saving_the_same_scrim_twice_fails() {
        let mut store = SqliteEventStore::open_in_memory().unwrap();
        let workbook = sample_workbook();
        store.save(7, &workbook).unwrap();
        let err = store.save(7, &workbook).unwrap_err();
        assert!(matches!(err, StorageError::ScrimAlreadyExists(7)));
    }

    #[test]
    fn delete_cascades_across_every_event_table() {
        let mut store = SqliteEventStore::open_in_memory().unwrap();
        store.save(7, &sample_workbook()).unwrap();
        store.delete(7).unwrap();

        let loaded = store.load(7).unwrap();
        for kind in EventKind::ALL {
            assert_eq!(loaded.kind_len(kind), 0, "{kind} rows survived the cascade");
        }
        assert_eq!(loaded, MatchWorkbook::default());
    }

    #[test]
    fn unknown_scrim_loads_empty() {
        let store = SqliteEventStore::open_in_memory().unwrap();
        assert_eq!(store.load(404).unwrap(), MatchWorkbook::default());
    }

    #[test]
    fn delete_of_unknown_scrim_is_a_no_op() {
        let mut store = SqliteEventStore::open_in_memory().unwrap();
        store.delete(404).unwrap();
    }

    #[test]
    fn scrims_persist_on_disk_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scrims.db");
        {
            let mut store = SqliteEventStore::open(&path).unwrap();
            store.save(1, &sample_workbook()).unwrap();
        }
        let store = SqliteEventStore::open(&path).unwrap();
        assert_eq!(store.scrim_ids().unwrap(), vec![1]);
        assert_eq!(store.load(1).unwrap(), sample_workbook());
    }
}
