//! Text-export parsing: tokenizer → record builder → workbook assembler.

use std::path::Path;

use tracing::debug;

use crate::combat_log::{LineTokenizer, build_record};
use crate::error::{ParseError, RecordError};
use crate::reader;
use crate::workbook::MatchWorkbook;

/// Result of one parse invocation: whatever built, plus everything that
/// didn't. Partial success is the default policy; the caller decides whether
/// the error count is acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub workbook: MatchWorkbook,
    pub errors: Vec<RecordError>,
    /// Blank or un-timestamped lines dropped by the tokenizer.
    pub skipped_lines: u64,
}

pub struct LogParser;

impl LogParser {
    /// Parse a raw text export already in memory.
    pub fn parse_str(text: &str) -> ParseOutcome {
        let mut workbook = MatchWorkbook::new();
        let mut errors = Vec::new();

        let mut tokenizer = LineTokenizer::new(text);
        for raw in tokenizer.by_ref() {
            match build_record(&raw.tag, raw.timestamp, &raw.fields, raw.line) {
                Ok(event) => workbook.push(event),
                Err(err) => errors.push(err),
            }
        }
        let skipped_lines = tokenizer.skipped();

        debug!(
            records = workbook.len(),
            errors = errors.len(),
            skipped = skipped_lines,
            "parsed text export"
        );
        ParseOutcome {
            workbook,
            errors,
            skipped_lines,
        }
    }

    /// Read and parse an export file. Only an unreadable or empty source is
    /// fatal; per-record failures land in the outcome.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseOutcome, ParseError> {
        let text = reader::read_log_text(path)?;
        Ok(Self::parse_str(&text))
    }
}
