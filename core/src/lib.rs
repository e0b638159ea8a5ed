//! scrimkit-core: combat-log ingestion and per-player analytics.
//!
//! The crate is a two-stage pipeline. The parsing stage turns a raw
//! line-oriented log export (or an equivalent sheet-per-kind tabulated
//! export) into an immutable [`MatchWorkbook`]; the analytics stage derives
//! per-player metrics (ultimate economy, duels, fights, X-Factor) as pure
//! reads over that workbook.

pub mod analytics;
pub mod combat_log;
pub mod equivalence;
pub mod error;
pub mod parser;
pub mod reader;
pub mod roster;
pub mod storage;
pub mod tabular;
pub mod workbook;

// Re-exports for convenience
pub use analytics::Analytics;
pub use combat_log::{Event, EventKind};
pub use error::{Anomaly, ParseError, RecordError};
pub use parser::{LogParser, ParseOutcome};
pub use workbook::MatchWorkbook;
