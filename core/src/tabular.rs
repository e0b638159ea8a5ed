//! Tabulated ingestion: the sheet-per-kind encoding of a match.
//!
//! Spreadsheet exports carry one sheet per event kind, named by the wire tag:
//! a header row (ignored), then data rows whose first cell is the timestamp
//! and whose remaining cells are the payload in text-grammar order. Feeding
//! those rows through the same record builder as the text path is what makes
//! the two ingestion paths produce identical workbooks.
//!
//! Two entry points: in-memory [`Sheet`] values, and a directory of
//! `<tag>.csv` files (comma-delimited, one file per sheet).

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::combat_log::{EventKind, build_record};
use crate::error::{ParseError, RecordError};
use crate::parser::ParseOutcome;
use crate::workbook::MatchWorkbook;

/// One sheet of a tabulated export. `rows[0]` is the header and is ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Assemble a workbook from tabulated sheets.
///
/// A sheet whose name is not a wire tag yields a single `UnknownEventKind`
/// error and is otherwise ignored; row-level failures accumulate like the
/// text path's.
pub fn parse_sheets(sheets: &[Sheet]) -> ParseOutcome {
    let mut workbook = MatchWorkbook::new();
    let mut errors = Vec::new();
    let mut skipped_lines = 0u64;

    for sheet in sheets {
        if EventKind::from_tag(&sheet.name).is_none() {
            errors.push(RecordError::UnknownEventKind {
                tag: sheet.name.clone(),
                line: 0,
            });
            continue;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate().skip(1) {
            // Header occupies index 0, so row_idx is the 1-based data row.
            let row_no = row_idx as u64;
            if row.is_empty() || row.iter().all(|cell| cell.trim().is_empty()) {
                skipped_lines += 1;
                continue;
            }
            let Ok(timestamp) = row[0].trim().parse::<f64>() else {
                skipped_lines += 1;
                continue;
            };
            if !timestamp.is_finite() || timestamp < 0.0 {
                skipped_lines += 1;
                continue;
            }
            let fields: Vec<Cow<'_, str>> =
                row[1..].iter().map(|cell| Cow::Borrowed(cell.as_str())).collect();
            match build_record(&sheet.name, timestamp, &fields, row_no) {
                Ok(event) => workbook.push(event),
                Err(err) => errors.push(err),
            }
        }
    }

    debug!(
        sheets = sheets.len(),
        records = workbook.len(),
        errors = errors.len(),
        "parsed tabulated export"
    );
    ParseOutcome {
        workbook,
        errors,
        skipped_lines,
    }
}

/// Load a directory of `<tag>.csv` sheets, sorted by file name for
/// deterministic error ordering.
pub fn load_sheet_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Sheet>, ParseError> {
    let dir = dir.as_ref();
    let unavailable = |source: std::io::Error| ParseError::SourceUnavailable {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(unavailable)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(ParseError::empty_source(dir.to_path_buf()));
    }

    let mut sheets = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| ParseError::SourceUnavailable {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?;
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ParseError::SourceUnavailable {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        sheets.push(Sheet { name, rows });
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::LogParser;

    /// The same match, once as a text export and once tabulated.
    const TEXT: &str = "\
0;match_start;Midtown;Hybrid;Team Alpha;Team Bravo\n\
0.5;round_start;1;All;0;0;0\n\
10;ultimate_charged;Team Alpha;Ana Main;Ana;0;1\n\
25;ultimate_start;Team Alpha;Ana Main;Ana;0;1\n\
30;kill;Team Alpha;Ana Main;Ana;Team Bravo;Flanker;Genji;Sleep Dart;5;0;0\n\
99;match_end;1;1;0\n";

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn tabulated() -> Vec<Sheet> {
        vec![
            Sheet::new(
                "match_start",
                vec![
                    row(&["match_time", "map_name", "map_type", "team_1_name", "team_2_name"]),
                    row(&["0", "Midtown", "Hybrid", "Team Alpha", "Team Bravo"]),
                ],
            ),
            Sheet::new(
                "round_start",
                vec![
                    row(&["match_time", "round", "capturing_team", "s1", "s2", "objective"]),
                    row(&["0.5", "1", "All", "0", "0", "0"]),
                ],
            ),
            Sheet::new(
                "ultimate_charged",
                vec![
                    row(&["match_time", "team", "player", "hero", "dup", "ult_id"]),
                    row(&["10", "Team Alpha", "Ana Main", "Ana", "0", "1"]),
                ],
            ),
            Sheet::new(
                "ultimate_start",
                vec![
                    row(&["match_time", "team", "player", "hero", "dup", "ult_id"]),
                    row(&["25", "Team Alpha", "Ana Main", "Ana", "0", "1"]),
                ],
            ),
            Sheet::new(
                "kill",
                vec![
                    row(&[
                        "match_time", "attacker_team", "attacker", "attacker_hero", "victim_team",
                        "victim", "victim_hero", "ability", "damage", "crit", "env",
                    ]),
                    row(&[
                        "30", "Team Alpha", "Ana Main", "Ana", "Team Bravo", "Flanker", "Genji",
                        "Sleep Dart", "5", "0", "0",
                    ]),
                ],
            ),
            Sheet::new(
                "match_end",
                vec![
                    row(&["match_time", "round", "s1", "s2"]),
                    row(&["99", "1", "1", "0"]),
                ],
            ),
        ]
    }

    #[test]
    fn equivalence_law_text_vs_tabulated() {
        let from_text = LogParser::parse_str(TEXT);
        let from_sheets = parse_sheets(&tabulated());
        assert!(from_text.errors.is_empty());
        assert!(from_sheets.errors.is_empty());
        assert_eq!(from_text.workbook, from_sheets.workbook);
    }

    #[test]
    fn unknown_sheet_yields_one_error_and_is_skipped() {
        let sheets = vec![Sheet::new(
            "echo_duplicate_start",
            vec![row(&["match_time"]), row(&["1"]), row(&["2"])],
        )];
        let outcome = parse_sheets(&sheets);
        assert!(outcome.workbook.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(matches!(
            outcome.errors[0],
            RecordError::UnknownEventKind { ref tag, .. } if tag == "echo_duplicate_start"
        ));
    }

    #[test]
    fn header_and_blank_rows_are_ignored() {
        let sheets = vec![Sheet::new(
            "setup_complete",
            vec![
                row(&["match_time", "round_number", "match_time_remaining"]),
                row(&["", "", ""]),
                row(&["5", "1", "240"]),
            ],
        )];
        let outcome = parse_sheets(&sheets);
        assert_eq!(outcome.workbook.setup_complete.len(), 1);
        assert_eq!(outcome.skipped_lines, 1);
    }

    #[test]
    fn sheet_dir_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("match_end.csv"),
            "match_time,round,s1,s2\n99,1,1,0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("kill.csv"),
            "match_time,at,an,ah,vt,vn,vh,ability,dmg,crit,env\n\
             30,Team Alpha,Ana Main,Ana,Team Bravo,Flanker,Genji,Sleep Dart,5,0,0\n",
        )
        .unwrap();

        let sheets = load_sheet_dir(dir.path()).unwrap();
        // Sorted by file name: kill before match_end.
        assert_eq!(sheets[0].name, "kill");
        assert_eq!(sheets[1].name, "match_end");

        let outcome = parse_sheets(&sheets);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.workbook.kill.len(), 1);
        assert_eq!(outcome.workbook.match_end.len(), 1);
        assert_eq!(outcome.workbook.kill[0].attacker_name, "Ana Main");
    }

    #[test]
    fn empty_sheet_dir_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_sheet_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::SourceUnavailable { .. }));
    }
}
