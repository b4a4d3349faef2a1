use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

/// A single closing price on a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// One date of the wide-format file with the tickers that have a numeric price on it.
///
/// Tickers whose cell was empty or non-numeric are absent from `prices`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub prices: BTreeMap<String, f64>,
}
