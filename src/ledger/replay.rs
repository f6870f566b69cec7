use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::LedgerClient;
use super::LedgerPage;
use crate::error::LedgerError;
use crate::model::Address;
use crate::model::RawTransaction;

/// Ledger answering from recorded histories.
///
/// Histories are keyed by lowercase address. Every request is recorded so
/// callers can check which addresses a trace expanded, in order.
#[derive(Debug, Default)]
pub struct ReplayLedger {
    histories:   HashMap<String, Vec<RawTransaction>>,
    unavailable: HashSet<String>,
    requests:    Mutex<Vec<String>>,
}

impl ReplayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `{ "<address>": [ <txlist record>, ... ], ... }`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, LedgerError> {
        let recorded: HashMap<String, Vec<RawTransaction>> = serde_json::from_str(raw)?;
        let mut ledger = Self::new();
        for (address, transactions) in recorded {
            let key = match Address::parse(&address) {
                Ok(address) => address.canonical(),
                Err(_) => address.to_ascii_lowercase(),
            };
            ledger.histories.entry(key).or_default().extend(transactions);
        }
        Ok(ledger)
    }

    pub fn with_history(
        mut self,
        address: &Address,
        transactions: Vec<RawTransaction>,
    ) -> Self {
        self.histories.entry(address.canonical()).or_default().extend(transactions);
        self
    }

    /// Requests for `address` fail as if the provider were unreachable
    pub fn with_unavailable(
        mut self,
        address: &Address,
    ) -> Self {
        self.unavailable.insert(address.canonical());
        self
    }

    pub fn address_count(&self) -> usize {
        self.histories.len()
    }

    /// Addresses requested so far, as passed in
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl LedgerClient for ReplayLedger {
    async fn fetch_transactions(
        &self,
        address: &Address,
    ) -> Result<LedgerPage, LedgerError> {
        self.requests.lock().await.push(address.as_str().to_string());

        let key = address.canonical();
        if self.unavailable.contains(&key) {
            return Err(LedgerError::Unavailable(format!("replay marks {} unreachable", address)));
        }

        Ok(match self.histories.get(&key) {
            Some(transactions) => LedgerPage::Transactions(transactions.clone()),
            None => LedgerPage::NoData {
                message: "No transactions found".to_string(),
            },
        })
    }
}
