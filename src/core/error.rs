use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum EsgError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A local CSV file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the header row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The resource was fetched but held no content.
    #[error("empty CSV content from {url}")]
    EmptyBody {
        /// Where the empty body came from.
        url: String,
    },

    /// The CSV had a header but no usable data rows.
    #[error("CSV contained no valid data rows")]
    NoRows,

    /// The header row is missing columns the record type cannot do without.
    #[error("CSV missing required header column(s): {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    /// A price series was requested for a ticker that has no column.
    #[error("symbol not found in price data: {0}")]
    UnknownSymbol(String),

    /// The data was in an unexpected format.
    #[error("Data format unexpected: {0}")]
    Data(String),
}

impl EsgError {
    /// True for failures that mean "nothing to show" rather than a broken transport.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            EsgError::EmptyBody { .. } | EsgError::NoRows | EsgError::MissingHeaders(_)
        )
    }
}
