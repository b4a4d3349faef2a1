//! Process-wide state containers for the dashboard.
//!
//! Each load fetches, parses and then replaces the relevant container in a
//! single assignment. Failures never propagate out of the `load_*` methods: they
//! are logged and the container is set to empty, so a consumer only ever sees
//! "data" or "no data". Concurrent loads of the same resource are not merged;
//! whichever finishes last wins.

mod writable;

pub use writable::Writable;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::company::{Company, CompanyLoader};
use crate::core::{CsvSource, EsgError};
use crate::filter::FilterState;
use crate::prices::{PriceLoader, PricePoint, PriceTable};

static GLOBAL: Lazy<DashboardStore> = Lazy::new(DashboardStore::new);

/// All dashboard state: loaded records, per-symbol series, filters and selection.
#[derive(Debug, Default)]
pub struct DashboardStore {
    companies: Writable<Vec<Company>>,
    prices: Writable<PriceTable>,
    series: Writable<BTreeMap<String, Vec<PricePoint>>>,
    filter: Writable<FilterState>,
    selected: Writable<Option<String>>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared instance for code that has no store threaded through it.
    pub fn global() -> &'static DashboardStore {
        &GLOBAL
    }

    /* ---------------- containers ---------------- */

    pub fn companies(&self) -> &Writable<Vec<Company>> {
        &self.companies
    }

    pub fn prices(&self) -> &Writable<PriceTable> {
        &self.prices
    }

    /// Symbol-keyed series filled by [`load_series`](Self::load_series).
    pub fn series(&self) -> &Writable<BTreeMap<String, Vec<PricePoint>>> {
        &self.series
    }

    pub fn filter(&self) -> &Writable<FilterState> {
        &self.filter
    }

    pub fn selected(&self) -> &Writable<Option<String>> {
        &self.selected
    }

    /* ---------------- loading ---------------- */

    /// Loads the company file and replaces the company list.
    ///
    /// Returns the number of companies now held (0 after any failure).
    pub async fn load_companies<S: CsvSource + ?Sized>(&self, source: &S) -> usize {
        let companies = match CompanyLoader::new(source).fetch().await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "error loading company data");
                Vec::new()
            }
        };
        let n = companies.len();
        self.companies.set(companies);
        tracing::info!(companies = n, "company store updated");
        n
    }

    /// Loads the price file and replaces the wide price table.
    ///
    /// Returns the number of dated rows now held (0 after any failure).
    pub async fn load_prices<S: CsvSource + ?Sized>(&self, source: &S) -> usize {
        let table = match PriceLoader::new(source).fetch_table().await {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(error = %e, "error loading price data");
                PriceTable::default()
            }
        };
        let n = table.len();
        self.prices.set(table);
        tracing::info!(dates = n, "price store updated");
        n
    }

    /// Fetches the price file and stores `symbol`'s series under that symbol.
    ///
    /// An unknown symbol, like any other failure, stores an empty series.
    /// Returns the number of points stored.
    pub async fn load_series<S: CsvSource + ?Sized>(&self, source: &S, symbol: &str) -> usize {
        let key = symbol.trim().to_string();
        let points = match PriceLoader::new(source).fetch_series(&key).await {
            Ok(points) => points,
            Err(EsgError::UnknownSymbol(sym)) => {
                tracing::warn!(symbol = %sym, "no price column for symbol");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(symbol = %key, error = %e, "error loading price series");
                Vec::new()
            }
        };
        let n = points.len();
        self.series.update(|m| {
            m.insert(key, points);
        });
        n
    }

    /* ---------------- queries ---------------- */

    /// The company with `symbol` (ASCII case-insensitive).
    pub fn company(&self, symbol: &str) -> Option<Company> {
        self.companies
            .get()
            .iter()
            .find(|c| c.symbol.eq_ignore_ascii_case(symbol.trim()))
            .cloned()
    }

    /// Companies passing the current filter, in the current sort order.
    pub fn filtered_companies(&self) -> Vec<Company> {
        let companies = self.companies.get();
        self.filter
            .get()
            .apply(&companies)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The stored series for `symbol`, or empty if it was never loaded.
    pub fn series_for(&self, symbol: &str) -> Vec<PricePoint> {
        self.series
            .get()
            .get(symbol.trim())
            .cloned()
            .unwrap_or_default()
    }

    /// The stored series for `symbol`, clipped to the filter's time range.
    pub fn visible_series(&self, symbol: &str) -> Vec<PricePoint> {
        self.filter.get().clip(&self.series_for(symbol))
    }

    /* ---------------- selection ---------------- */

    /// Marks `symbol` as the focused company (`None` clears it).
    pub fn select(&self, symbol: Option<&str>) {
        self.selected.set(symbol.map(|s| s.trim().to_string()));
    }

    /// The focused company, if one is selected and present in the loaded list.
    pub fn selected_company(&self) -> Option<Company> {
        let selected = self.selected.get();
        selected.as_deref().and_then(|s| self.company(s))
    }

    /// Drops every loaded record and restores default filters and selection.
    pub fn reset(&self) {
        self.companies.set(Vec::new());
        self.prices.set(PriceTable::default());
        self.series.set(BTreeMap::new());
        self.filter.set(FilterState::default());
        self.selected.set(None);
        tracing::debug!("dashboard store reset");
    }
}
