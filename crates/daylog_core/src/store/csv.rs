//! Minimal quote-aware CSV record codec.
//!
//! # Responsibility
//! - Split file content into records of string fields.
//! - Render records back, quoting only when a field requires it.
//!
//! # Invariants
//! - A `"` inside a quoted field is escaped as `""` in both directions.
//! - An unterminated quoted field fails the whole parse; the store maps
//!   that to its unavailable-storage error.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum CsvParseError {
    /// Input ended while inside a quoted field.
    UnterminatedQuote,
}

impl Display for CsvParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnterminatedQuote => write!(f, "unterminated quoted field"),
        }
    }
}

impl Error for CsvParseError {}

/// Parses CSV content into records of fields.
///
/// Records end at unquoted `\n`; `\r` is ignored, so CRLF input works. A
/// trailing newline does not produce an empty final record.
pub fn parse_records(input: &str) -> Result<Vec<Vec<String>>, CsvParseError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes {
                    if chars.peek() == Some(&'"') {
                        field.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                record.push(std::mem::take(&mut field));
            }
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            '\r' if !in_quotes => {}
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvParseError::UnterminatedQuote);
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

/// Appends one record to `out`, quoting fields that need it.
pub fn push_record(out: &mut String, fields: &[String]) {
    for (index, value) in fields.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let needs_quotes =
            value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r');
        if needs_quotes {
            out.push('"');
            for c in value.chars() {
                if c == '"' {
                    out.push_str("\"\"");
                } else {
                    out.push(c);
                }
            }
            out.push('"');
        } else {
            out.push_str(value);
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{parse_records, push_record, CsvParseError};

    fn record(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn parses_plain_records() {
        let parsed = parse_records("a,b,c\n1,2,3\n").unwrap();
        assert_eq!(parsed, vec![record(&["a", "b", "c"]), record(&["1", "2", "3"])]);
    }

    #[test]
    fn parses_quoted_commas_newlines_and_escaped_quotes() {
        let parsed = parse_records("date,notes\n2024-01-01,\"slept badly, twice\n\"\"ugh\"\"\"\n").unwrap();
        assert_eq!(
            parsed,
            vec![
                record(&["date", "notes"]),
                record(&["2024-01-01", "slept badly, twice\n\"ugh\""]),
            ]
        );
    }

    #[test]
    fn missing_trailing_newline_keeps_last_record() {
        let parsed = parse_records("a,b\n1,2").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], record(&["1", "2"]));
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let parsed = parse_records("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(parsed, vec![record(&["a", "b"]), record(&["1", "2"])]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_records("a,b\n\"broken,2\n").unwrap_err();
        assert_eq!(err, CsvParseError::UnterminatedQuote);
    }

    #[test]
    fn writer_quotes_only_when_needed_and_round_trips() {
        let original = record(&["2024-01-01", "7.5", "plain", "has, comma", "has \"quote\""]);
        let mut out = String::new();
        push_record(&mut out, &original);
        assert_eq!(out, "2024-01-01,7.5,plain,\"has, comma\",\"has \"\"quote\"\"\"\n");

        let parsed = parse_records(&out).unwrap();
        assert_eq!(parsed, vec![original]);
    }
}
