use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::ledger::LedgerPage;
use crate::ledger::MockLedgerClient;
use crate::ledger::Throttle;
use crate::model::RawTransaction;

/// Throttle that never waits and counts how often it was asked
#[derive(Debug, Default)]
pub struct CountingThrottle {
    acquired: AtomicUsize,
}

impl CountingThrottle {
    pub fn count(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Throttle for CountingThrottle {
    async fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock ledger implementations for testing
pub struct MockLedgers;

impl MockLedgers {
    /// Answers every address with the same history
    pub fn always(transactions: Vec<RawTransaction>) -> MockLedgerClient {
        let mut mock = MockLedgerClient::new();
        mock.expect_fetch_transactions()
            .returning(move |_| Ok(LedgerPage::Transactions(transactions.clone())));
        mock
    }

    /// Fails every request
    pub fn unreachable() -> MockLedgerClient {
        let mut mock = MockLedgerClient::new();
        mock.expect_fetch_transactions()
            .returning(|address| Err(LedgerError::Unavailable(format!("{} unreachable", address))));
        mock
    }

    /// Panics if the ledger is touched at all
    pub fn untouched() -> MockLedgerClient {
        let mut mock = MockLedgerClient::new();
        mock.expect_fetch_transactions().never();
        mock
    }
}
