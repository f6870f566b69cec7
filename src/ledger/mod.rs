pub mod etherscan;
pub mod replay;
pub mod throttle;

use async_trait::async_trait;

pub use etherscan::EtherscanClient;
pub use replay::ReplayLedger;
pub use throttle::FixedDelay;
pub use throttle::Throttle;
pub use throttle::WindowLimiter;

use crate::error::LedgerError;
use crate::model::Address;
use crate::model::RawTransaction;

/// One answer from the ledger for an address's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerPage {
    Transactions(Vec<RawTransaction>),
    /// Provider answered with a non-success status
    NoData { message: String },
}

impl LedgerPage {
    pub fn into_transactions(self) -> Vec<RawTransaction> {
        match self {
            LedgerPage::Transactions(transactions) => transactions,
            LedgerPage::NoData { .. } => Vec::new(),
        }
    }
}

/// Source of an address's transaction history.
///
/// `Err` is reserved for transport and decoding failures; a provider that
/// answers "nothing here" returns [`LedgerPage::NoData`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn fetch_transactions(
        &self,
        address: &Address,
    ) -> Result<LedgerPage, LedgerError>;
}
