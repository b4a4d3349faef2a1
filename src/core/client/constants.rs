//! Centralized constants for default endpoints and UA.

/// UA sent with every CSV request unless overridden.
pub(crate) const USER_AGENT: &str = concat!("esg-dashboard/", env!("CARGO_PKG_VERSION"));

/// Host serving the dashboard's static files (paths are joined onto it).
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

/// Company / ESG metadata file, relative to the base URL.
pub(crate) const DEFAULT_COMPANY_PATH: &str = "processed_sp500_esg_data.csv";

/// Wide-format daily price file, relative to the base URL.
pub(crate) const DEFAULT_PRICE_PATH: &str = "sp500_price_data.csv";
