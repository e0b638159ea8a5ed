//! One-pass line tokenizer for raw text exports.
//!
//! Splits an export into `(timestamp, tag, payload fields)` records. Fields
//! are `;`-delimited; a field may be double-quoted, in which case embedded
//! delimiters are preserved and `""` unescapes to a literal quote. Blank
//! lines and lines without a parseable leading timestamp are skipped and
//! counted, never fatal.
//!
//! The tokenizer is a single forward pass over the input; reparsing requires
//! a fresh instance.

use std::borrow::Cow;

use memchr::memchr;

const DELIMITER: u8 = b';';

/// A tokenized line, not yet typed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord<'a> {
    /// 1-based line number in the source.
    pub line: u64,
    pub timestamp: f64,
    pub tag: Cow<'a, str>,
    /// Payload fields after the timestamp and tag.
    pub fields: Vec<Cow<'a, str>>,
}

pub struct LineTokenizer<'a> {
    rest: &'a str,
    line_no: u64,
    skipped: u64,
}

impl<'a> LineTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines skipped so far (blank, too short, or no leading timestamp).
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn next_line(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        self.line_no += 1;
        let (line, rest) = match memchr(b'\n', self.rest.as_bytes()) {
            Some(pos) => (&self.rest[..pos], &self.rest[pos + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}

impl<'a> Iterator for LineTokenizer<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<RawRecord<'a>> {
        loop {
            let line = self.next_line()?;
            if line.trim().is_empty() {
                self.skipped += 1;
                continue;
            }
            let fields = split_fields(line);
            if fields.len() < 2 {
                self.skipped += 1;
                continue;
            }
            let Ok(timestamp) = fields[0].trim().parse::<f64>() else {
                self.skipped += 1;
                continue;
            };
            // Timestamps are seconds since match start; negative means the
            // leading field was not a timestamp after all.
            if !timestamp.is_finite() || timestamp < 0.0 {
                self.skipped += 1;
                continue;
            }
            let mut iter = fields.into_iter().skip(1);
            let Some(tag) = iter.next() else {
                self.skipped += 1;
                continue;
            };
            return Some(RawRecord {
                line: self.line_no,
                timestamp,
                tag,
                fields: iter.collect(),
            });
        }
    }
}

/// Split one line on the delimiter, honoring double-quoted fields.
///
/// Unquoted fields borrow from the input; a quoted field allocates only when
/// it needs unescaping.
fn split_fields(line: &str) -> Vec<Cow<'_, str>> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos <= bytes.len() {
        if pos < bytes.len() && bytes[pos] == b'"' {
            let (field, after) = take_quoted(line, pos);
            fields.push(field);
            match memchr(DELIMITER, &bytes[after..]) {
                Some(d) => pos = after + d + 1,
                None => return fields,
            }
        } else {
            match memchr(DELIMITER, &bytes[pos..]) {
                Some(d) => {
                    fields.push(Cow::Borrowed(&line[pos..pos + d]));
                    pos += d + 1;
                }
                None => {
                    fields.push(Cow::Borrowed(&line[pos..]));
                    return fields;
                }
            }
        }
    }
    fields
}

/// Consume a quoted field starting at the opening quote; returns the field
/// content and the byte offset just past the closing quote.
fn take_quoted(line: &str, start: usize) -> (Cow<'_, str>, usize) {
    let bytes = line.as_bytes();
    let mut buf = String::new();
    let mut i = start + 1;
    loop {
        match memchr(b'"', &bytes[i..]) {
            Some(q) => {
                let q = i + q;
                buf.push_str(&line[i..q]);
                if bytes.get(q + 1) == Some(&b'"') {
                    // Doubled quote escapes a literal quote.
                    buf.push('"');
                    i = q + 2;
                } else {
                    return (Cow::Owned(buf), q + 1);
                }
            }
            None => {
                // Unterminated quote: take the rest of the line.
                buf.push_str(&line[i..]);
                return (Cow::Owned(buf), bytes.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(input: &str) -> RawRecord<'_> {
        let mut tok = LineTokenizer::new(input);
        tok.next().expect("expected one record")
    }

    #[test]
    fn splits_plain_line() {
        let rec = record("1.05;kill;Team A;Lucas;Cassidy;Team B;Marcus;Ana;Primary;64;0;0");
        assert_eq!(rec.line, 1);
        assert_eq!(rec.timestamp, 1.05);
        assert_eq!(rec.tag, "kill");
        assert_eq!(rec.fields.len(), 10);
        assert_eq!(rec.fields[0], "Team A");
        assert_eq!(rec.fields[9], "0");
    }

    #[test]
    fn quoted_field_keeps_embedded_delimiter() {
        let rec = record("0;match_start;Midtown;Hybrid;\"Alpha; Bravo\";Team 2");
        assert_eq!(rec.fields[2], "Alpha; Bravo");
        assert_eq!(rec.fields[3], "Team 2");
    }

    #[test]
    fn doubled_quote_unescapes() {
        let rec = record("0;hero_spawn;Team 1;\"The \"\"Wall\"\"\";Reinhardt;0;0");
        assert_eq!(rec.fields[1], "The \"Wall\"");
    }

    #[test]
    fn blank_and_untimestamped_lines_are_counted_not_fatal() {
        let input = "\n\
                     garbage without delimiter\n\
                     abc;kill;x\n\
                     2;setup_complete;1;240.5\n";
        let mut tok = LineTokenizer::new(input);
        let recs: Vec<_> = tok.by_ref().collect();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].tag, "setup_complete");
        assert_eq!(recs[0].line, 4);
        assert_eq!(tok.skipped(), 3);
    }

    #[test]
    fn negative_timestamp_is_skipped() {
        let mut tok = LineTokenizer::new("-1;kill;a\n3;round_start;1;All;0;0;0\n");
        let recs: Vec<_> = tok.by_ref().collect();
        assert_eq!(recs.len(), 1);
        assert_eq!(tok.skipped(), 1);
    }

    #[test]
    fn trailing_empty_field_is_preserved() {
        let rec = record("4;hero_swap;Team 1;Ana Main;Ana;;0");
        assert_eq!(rec.fields, vec!["Team 1", "Ana Main", "Ana", "", "0"]);
    }

    #[test]
    fn crlf_line_endings() {
        let rec = record("7;match_end;3;2;1\r\n");
        assert_eq!(rec.fields, vec!["3", "2", "1"]);
    }
}
