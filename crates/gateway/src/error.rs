use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway rejected request with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid gateway input: {0}")]
    Input(String),
}
