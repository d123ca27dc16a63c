//! Comma-separated table codec
//!
//! Reads and writes the two source tables. Fields may be quoted; inside
//! quotes a doubled `""` is a literal quote and commas or line breaks are
//! part of the value.

use std::borrow::Cow;
use thiserror::Error;

/// Structural problems that make a whole table unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("table has no header row")]
    MissingHeader,

    #[error("unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),

    #[error("required column '{0}' not found in header")]
    MissingColumn(String),
}

/// One data row and the line it started on (the header is line 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    /// Field at `idx`, or `None` when the row is short
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
}

/// Header plus data rows, unvalidated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Parse delimited text. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let mut records: Vec<RawRow> = Vec::new();
        let mut fields: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut at_field_start = true;
        let mut line = 1;
        let mut record_line = 1;
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' if at_field_start => {
                    in_quotes = true;
                    at_field_start = false;
                }
                ',' => {
                    fields.push(std::mem::take(&mut field));
                    at_field_start = true;
                }
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' | '\r' => {
                    finish_record(&mut records, &mut fields, &mut field, record_line);
                    line += 1;
                    record_line = line;
                    at_field_start = true;
                }
                _ => {
                    field.push(c);
                    at_field_start = false;
                }
            }
        }

        if in_quotes {
            return Err(TableError::UnterminatedQuote(record_line));
        }
        finish_record(&mut records, &mut fields, &mut field, record_line);

        let mut records = records.into_iter();
        let header = records.next().ok_or(TableError::MissingHeader)?;
        Ok(RawTable {
            header: header.fields.into_iter().map(|h| h.trim().to_string()).collect(),
            rows: records.collect(),
        })
    }

    /// Position of a header column
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Positions of all `names`, failing on the first one absent
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, TableError> {
        names
            .iter()
            .map(|name| {
                self.column(name)
                    .ok_or_else(|| TableError::MissingColumn(name.to_string()))
            })
            .collect()
    }
}

fn finish_record(
    records: &mut Vec<RawRow>,
    fields: &mut Vec<String>,
    field: &mut String,
    line: usize,
) {
    if fields.is_empty() && field.is_empty() {
        return;
    }
    fields.push(std::mem::take(field));
    records.push(RawRow {
        line,
        fields: std::mem::take(fields),
    });
}

/// Quote a field when it contains a delimiter, a quote or a line break
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Append one record and a trailing newline to `out`
pub fn push_record<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, value) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(value.as_ref()));
    }
    out.push('\n');
}
