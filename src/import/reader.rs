//! Tokenizer layer: splits raw text into logical records before any domain
//! meaning is attached.
//!
//! Two readers live here. [`CsvReader`] yields one [`CsvRecord`] per CSV
//! row using a pragmatic quoted-field scanner: commas inside double quotes
//! do not delimit, doubled quotes (`""`) unescape to a literal `"`, and a
//! quoted field may span multiple lines. This is deliberately not an
//! RFC-4180 validator. [`numbered_lines`] is the line iterator the markdown
//! importer consumes, with 1-based numbering for error messages.

use tracing::debug;

use crate::error::{GuideError, Result};

/// One logical CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// Field values in column order, quotes already resolved.
    pub fields: Vec<String>,
    /// 1-based line number where the record started.
    pub line: usize,
}

/// Iterator over logical CSV records.
///
/// Records consisting of a single empty line are skipped; an unterminated
/// quoted field at end of input yields a [`GuideError::StructuralError`]
/// and ends iteration.
pub struct CsvReader<'a> {
    rest: &'a str,
    line: usize,
    failed: bool,
}

impl<'a> CsvReader<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line: 1,
            failed: false,
        }
    }

    /// Scan one record off the front of `rest`. Returns `None` at end of
    /// input, `Some(None)` for a blank record the caller should skip.
    fn scan_record(&mut self) -> Option<Result<Option<CsvRecord>>> {
        if self.failed || self.rest.is_empty() {
            return None;
        }

        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut consumed = self.rest.len();
        let mut terminated = false;

        let mut chars = self.rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if in_quotes {
                match c {
                    '"' => {
                        if chars.peek().is_some_and(|&(_, next)| next == '"') {
                            chars.next();
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    }
                    '\n' => {
                        self.line += 1;
                        field.push('\n');
                    }
                    other => field.push(other),
                }
            } else {
                match c {
                    '"' if field.is_empty() => in_quotes = true,
                    ',' => fields.push(std::mem::take(&mut field)),
                    '\r' => {}
                    '\n' => {
                        self.line += 1;
                        consumed = i + 1;
                        terminated = true;
                        break;
                    }
                    other => field.push(other),
                }
            }
        }

        if in_quotes {
            self.failed = true;
            return Some(Err(GuideError::StructuralError(format!(
                "unterminated quoted field in record starting at line {start_line}"
            ))));
        }

        if !terminated {
            consumed = self.rest.len();
        }
        self.rest = &self.rest[consumed..];
        fields.push(field);

        // A bare empty line is not a record.
        if fields.len() == 1 && fields[0].is_empty() {
            debug!(line = start_line, "skipping blank csv line");
            return Some(Ok(None));
        }

        Some(Ok(Some(CsvRecord {
            fields,
            line: start_line,
        })))
    }
}

impl Iterator for CsvReader<'_> {
    type Item = Result<CsvRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.scan_record()? {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Lines of `text` paired with 1-based line numbers.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line))
}
