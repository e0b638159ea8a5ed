//! Error taxonomy for the parsing pipeline.
//!
//! Per-record failures ([`RecordError`]) are accumulated and returned next to
//! the workbook; they never abort a parse. The only fatal condition is an
//! unreadable or empty source ([`ParseError::SourceUnavailable`]). Derived
//! analytics record lifecycle irregularities as [`Anomaly`] values.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::analytics::ultimates::UltState;
use crate::combat_log::EventKind;

/// A single record failed to build. The rest of the parse continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("line {line}: malformed {kind} record: expected {expected_arity} fields, got {actual_arity}")]
    MalformedRecord {
        kind: EventKind,
        expected_arity: usize,
        actual_arity: usize,
        line: u64,
    },

    #[error("line {line}: unknown event kind tag `{tag}`")]
    UnknownEventKind { tag: String, line: u64 },

    #[error("line {line}: {kind} field {field_index}: cannot coerce `{value}`")]
    FieldTypeMismatch {
        kind: EventKind,
        /// Zero-based position within the payload (timestamp and tag excluded).
        field_index: usize,
        value: String,
        line: u64,
    },
}

/// Fatal parse failure: the input source itself could not be read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// An empty export is treated the same as an unreadable one.
    pub fn empty_source(path: PathBuf) -> Self {
        ParseError::SourceUnavailable {
            path,
            source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "log export is empty"),
        }
    }
}

/// Non-fatal data irregularity observed while deriving analytics.
///
/// Anomalies are recorded and returned to the caller; the state machine
/// resynchronizes by treating the offending event as authoritative.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum Anomaly {
    #[error("{player}: ultimate {from:?} -> {to:?} at t={at}")]
    AnomalousStateTransition {
        player: String,
        at: f64,
        from: UltState,
        to: UltState,
    },
}
