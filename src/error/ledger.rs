use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("[Ledger] Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("[Ledger] Unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("[Ledger] Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("[Ledger] Invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    #[error("[Ledger] Failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("[Ledger] Provider unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            LedgerError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            LedgerError::Status(status) => status.as_u16() == 429 || status.is_server_error(),
            _ => false,
        }
    }
}
