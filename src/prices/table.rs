use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::EsgError;
use crate::core::conversions::{parse_date, parse_number};
use crate::prices::model::{PricePoint, PriceRow};
use crate::table::CsvTable;

const DATE: &[&str] = &["date", "day", "timestamp"];

/// Daily closing prices in wide format: one row per date, one column per ticker.
///
/// Rows are kept sorted by date, oldest first. Cells that were empty or
/// non-numeric are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    symbols: Vec<String>,
    dates: Vec<NaiveDate>,
    // column-major, `columns[symbol][row]`
    columns: Vec<Vec<Option<f64>>>,
}

impl PriceTable {
    /// Parses wide-format price CSV text.
    ///
    /// The date column is the one whose header normalizes to `date` (or `day`,
    /// `timestamp`); without one, the first column is used. Every other column with
    /// a non-blank header is a ticker. Rows whose date cannot be parsed are logged
    /// and dropped.
    ///
    /// # Errors
    /// * [`EsgError::EmptyBody`] / [`EsgError::NoRows`] when nothing usable remains.
    /// * [`EsgError::MissingHeaders`] when the header has no ticker columns.
    pub fn parse(text: &str) -> Result<Self, EsgError> {
        let table = CsvTable::parse(text)?;
        let headers = table.headers();
        let date_idx = headers.find(DATE).unwrap_or(0);

        let (col_idx, symbols): (Vec<usize>, Vec<String>) = headers
            .names()
            .iter()
            .enumerate()
            .filter(|(i, name)| *i != date_idx && !name.is_empty())
            .map(|(i, name)| (i, name.clone()))
            .unzip();
        if symbols.is_empty() {
            return Err(EsgError::MissingHeaders(vec!["ticker column".into()]));
        }

        let mut dated: Vec<(NaiveDate, Vec<Option<f64>>)> = Vec::with_capacity(table.len());
        for row in table.rows() {
            let raw_date = row.cell(Some(date_idx));
            let Some(date) = parse_date(raw_date) else {
                tracing::warn!(line = ?row.line(), date = raw_date, "dropping price row with unparsable date");
                continue;
            };
            let cells = col_idx
                .iter()
                .map(|&i| parse_number(row.cell(Some(i))))
                .collect();
            dated.push((date, cells));
        }

        if dated.is_empty() {
            return Err(EsgError::NoRows);
        }
        // stable: same-day rows keep file order
        dated.sort_by_key(|(d, _)| *d);

        let mut columns = vec![Vec::with_capacity(dated.len()); symbols.len()];
        let mut dates = Vec::with_capacity(dated.len());
        for (date, cells) in dated {
            dates.push(date);
            for (col, cell) in columns.iter_mut().zip(cells) {
                col.push(cell);
            }
        }

        tracing::debug!(symbols = symbols.len(), dates = dates.len(), "parsed price table");
        Ok(Self {
            symbols,
            dates,
            columns,
        })
    }

    /// Ticker columns in header order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Row dates, oldest first.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of dated rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Column position of `symbol`: exact match first, then ASCII case-insensitive.
    fn column_of(&self, symbol: &str) -> Option<usize> {
        let symbol = symbol.trim();
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .or_else(|| {
                self.symbols
                    .iter()
                    .position(|s| s.eq_ignore_ascii_case(symbol))
            })
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.column_of(symbol).is_some()
    }

    /// The date/price series for one ticker, oldest first, non-numeric prices excluded.
    ///
    /// # Errors
    /// [`EsgError::UnknownSymbol`] when the ticker has no column.
    pub fn series(&self, symbol: &str) -> Result<Vec<PricePoint>, EsgError> {
        let idx = self
            .column_of(symbol)
            .ok_or_else(|| EsgError::UnknownSymbol(symbol.to_string()))?;
        Ok(self.collect_column(idx))
    }

    fn collect_column(&self, idx: usize) -> Vec<PricePoint> {
        self.dates
            .iter()
            .zip(&self.columns[idx])
            .filter_map(|(date, price)| {
                price.map(|price| PricePoint {
                    date: *date,
                    price,
                })
            })
            .collect()
    }

    /// Most recent numeric price for `symbol`.
    pub fn latest(&self, symbol: &str) -> Option<PricePoint> {
        let idx = self.column_of(symbol)?;
        self.dates
            .iter()
            .zip(&self.columns[idx])
            .rev()
            .find_map(|(date, price)| price.map(|price| PricePoint { date: *date, price }))
    }

    /// The table as sparse rows, one per date.
    pub fn rows(&self) -> Vec<PriceRow> {
        self.dates
            .iter()
            .enumerate()
            .map(|(r, date)| PriceRow {
                date: *date,
                prices: self
                    .symbols
                    .iter()
                    .zip(&self.columns)
                    .filter_map(|(sym, col)| col[r].map(|p| (sym.clone(), p)))
                    .collect(),
            })
            .collect()
    }

    /// Converts to a symbol-keyed map of series.
    pub fn into_keyed(self) -> BTreeMap<String, Vec<PricePoint>> {
        (0..self.symbols.len())
            .map(|i| (self.symbols[i].clone(), self.collect_column(i)))
            .collect()
    }
}
