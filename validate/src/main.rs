//! scrimkit-validate - equivalence checker for the two ingestion paths.
//!
//! Parses the same match twice, once from the raw text export and once from
//! a directory of per-kind CSV sheets, and diffs the resulting workbooks
//! field-for-field. Exit code 0 means the equivalence law held.
//!
//! Usage: scrimkit-validate <log.txt> <sheets-dir>

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use scrimkit_core::combat_log::EventKind;
use scrimkit_core::equivalence;
use scrimkit_core::parser::LogParser;
use scrimkit_core::tabular;

#[derive(Parser)]
#[command(version, about = "Validate text vs tabulated ingestion equivalence")]
struct Args {
    /// Raw text export.
    log: PathBuf,

    /// Directory of `<kind>.csv` sheets for the same match.
    sheets: PathBuf,
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let from_text = LogParser::parse_file(&args.log).map_err(|e| e.to_string())?;
    let sheets = tabular::load_sheet_dir(&args.sheets).map_err(|e| e.to_string())?;
    let from_sheets = tabular::parse_sheets(&sheets);

    println!(
        "text:      {} records, {} record errors, {} skipped lines",
        from_text.workbook.len(),
        from_text.errors.len(),
        from_text.skipped_lines
    );
    println!(
        "tabulated: {} records, {} record errors, {} skipped lines",
        from_sheets.workbook.len(),
        from_sheets.errors.len(),
        from_sheets.skipped_lines
    );

    let mismatches = equivalence::compare(&from_text.workbook, &from_sheets.workbook);
    if mismatches.is_empty() {
        for kind in EventKind::ALL {
            let rows = from_text.workbook.kind_len(kind);
            if rows > 0 {
                println!("  ok {kind}: {rows} rows");
            }
        }
        println!("workbooks are equivalent");
        return Ok(());
    }

    for mismatch in &mismatches {
        eprintln!("mismatch: {mismatch}");
    }
    Err(format!("{} kinds differ", mismatches.len()))
}
