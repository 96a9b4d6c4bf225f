/// Errors from the spreadsheet storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Sheets API returned a non-2xx status code.
    #[error("Sheets API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Service-account authentication failed (bad key, token exchange).
    #[error("Sheets auth error: {0}")]
    Auth(String),

    /// A cell could not be parsed into its expected type.
    #[error("Malformed cell data: {0}")]
    BadCell(String),
}
