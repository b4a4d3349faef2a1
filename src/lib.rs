//! esg-dashboard: data layer for an S&P 500 ESG and price-history dashboard.
//!
//! The crate loads two static CSV resources, the company/ESG metadata file and a
//! wide-format daily price file, parses them into typed records and keeps them in
//! replace-on-load state containers that a front end can subscribe to.
//!
//! ```no_run
//! use esg_dashboard::{DashboardStore, EsgClient};
//!
//! # async fn run() -> Result<(), esg_dashboard::EsgError> {
//! let client = EsgClient::builder()
//!     .base_url(url::Url::parse("http://localhost:5173/")?)
//!     .build()?;
//!
//! let store = DashboardStore::new();
//! store.load_companies(&client).await;
//! store.load_series(&client, "AAPL").await;
//!
//! for company in store.filtered_companies() {
//!     println!("{} {:.1}", company.symbol, company.esg.total);
//! }
//! # Ok(())
//! # }
//! ```

/// Client configuration, networking and shared helpers.
pub mod core;

/// Company / ESG metadata records and their loader.
pub mod company;
/// Dashboard filter and sort state.
pub mod filter;
/// Wide-format price history and per-symbol series lookup.
pub mod prices;
/// Reactive state containers.
pub mod store;
/// CSV tokenizing and header mapping.
pub mod table;

pub use crate::core::{
    CsvSource, DirSource, EsgClient, EsgClientBuilder, EsgError,
    client::{Backoff, CacheMode, RetryConfig},
};
pub use company::{Company, CompanyLoader, EsgScores, PillarScore, parse_companies, try_parse_companies};
pub use filter::{FilterState, SortDirection, SortField};
pub use prices::{PriceLoader, PricePoint, PriceRow, PriceTable};
pub use store::{DashboardStore, Writable};
pub use table::{CsvTable, HeaderMap, normalize_header};

/// Installs a `tracing` subscriber driven by `RUST_LOG` (default `info`).
///
/// Intended for demos and tests; libraries embedding this crate should install
/// their own subscriber instead.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
