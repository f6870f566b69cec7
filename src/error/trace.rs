use thiserror::Error;

use super::ledger::LedgerError;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("Ledger API key not available")]
    MissingApiKey,

    #[error("Failed to fetch transactions for seed {address}: {source}")]
    Ledger {
        address: String,
        #[source]
        source: LedgerError,
    },
}
