//! Raw log file reading.
//!
//! Exports come from a game overlay on Windows machines, so the bytes are
//! memory-mapped and decoded defensively: UTF-8 with BOM removal first,
//! WINDOWS-1252 as the fallback for stray legacy bytes.

use std::fs::File;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use memmap2::Mmap;

use crate::error::ParseError;

/// Read and decode an export into a `String`.
///
/// An unreadable or empty file is the one fatal parse condition
/// ([`ParseError::SourceUnavailable`]).
pub fn read_log_text<P: AsRef<Path>>(path: P) -> Result<String, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ParseError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| ParseError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })?;
    let bytes = mmap.as_ref();
    if bytes.is_empty() {
        return Err(ParseError::empty_source(path.to_path_buf()));
    }
    Ok(decode(bytes))
}

fn decode(bytes: &[u8]) -> String {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_with_bom_removal(bytes);
        return text.into_owned();
    }
    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        return text.into_owned();
    }
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
