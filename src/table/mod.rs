//! CSV tokenizing shared by the company and price parsers.
//!
//! Text is read with the `csv` crate in flexible mode: quoted fields may hold
//! commas, doubled quotes and line breaks, and rows shorter or longer than the
//! header are kept (missing cells read as empty). Rows the reader rejects are
//! logged and dropped; the rest of the file still loads.

mod header;

pub use header::{HeaderMap, normalize_header};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::core::EsgError;

/// A tokenized CSV document: header mapping plus the surviving data rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: HeaderMap,
    rows: Vec<StringRecord>,
    dropped: usize,
}

/// One data row, read through the table's header mapping.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    record: &'a StringRecord,
}

impl TableRow<'_> {
    /// Cell at `index`, or `""` when the index is absent or past the row's end.
    pub fn cell(&self, index: Option<usize>) -> &str {
        index.and_then(|i| self.record.get(i)).unwrap_or("")
    }

    /// 1-based line in the source text where the row starts, when known.
    pub fn line(&self) -> Option<u64> {
        self.record.position().map(csv::Position::line)
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }
}

impl CsvTable {
    /// Tokenizes `text`, whose first non-blank line is the header row.
    ///
    /// # Errors
    /// * [`EsgError::EmptyBody`] when the text is blank.
    /// * [`EsgError::NoRows`] when no data row survives.
    /// * [`EsgError::Csv`] when the header row itself cannot be read.
    pub fn parse(text: &str) -> Result<Self, EsgError> {
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(EsgError::EmptyBody {
                url: "<inline text>".into(),
            });
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = HeaderMap::new(rdr.headers()?.iter());

        let mut rows = Vec::new();
        let mut dropped = 0usize;
        for result in rdr.records() {
            match result {
                Ok(record) if record.iter().all(str::is_empty) => {}
                Ok(record) => rows.push(record),
                Err(e) => {
                    dropped += 1;
                    let line = e.position().map(csv::Position::line);
                    tracing::warn!(?line, error = %e, "dropping unreadable CSV row");
                }
            }
        }

        if rows.is_empty() {
            return Err(EsgError::NoRows);
        }

        tracing::debug!(rows = rows.len(), dropped, columns = headers.len(), "tokenized CSV");
        Ok(Self {
            headers,
            rows,
            dropped,
        })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Iterates the data rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().map(|record| TableRow { record })
    }

    /// Number of data rows kept.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows the reader rejected while tokenizing.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Fails with [`EsgError::MissingHeaders`] listing every `(label, aliases)` pair
    /// that has no matching column.
    pub fn require(&self, required: &[(&str, &[&str])]) -> Result<(), EsgError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|(_, aliases)| self.headers.find(aliases).is_none())
            .map(|(label, _)| (*label).to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EsgError::MissingHeaders(missing))
        }
    }
}
