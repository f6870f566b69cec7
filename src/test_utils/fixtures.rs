use crate::model::AcceptedTransaction;
use crate::model::Address;
use crate::model::RawTransaction;
use crate::model::transaction::format_timestamp;

pub const NOW: i64 = 1_700_000_000;

pub const ONE_ETH: u128 = 1_000_000_000_000_000_000;

/// Test fixtures for creating consistent test data
pub struct TestFixtures;

impl TestFixtures {
    /// Deterministic address containing hex letters, so case variants differ
    pub fn address(n: u64) -> Address {
        Address::parse(&format!("0xabcdef{:034x}", n)).unwrap()
    }

    /// Successful outgoing transfer at `timestamp`
    pub fn raw(
        from: &Address,
        to: &Address,
        wei: u128,
        timestamp: i64,
        hash: &str,
    ) -> RawTransaction {
        RawTransaction {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
            value: wei.to_string(),
            hash: hash.to_string(),
            time_stamp: timestamp.to_string(),
            is_error: "0".to_string(),
        }
    }

    pub fn failed_raw(
        from: &Address,
        to: &Address,
        wei: u128,
        timestamp: i64,
        hash: &str,
    ) -> RawTransaction {
        RawTransaction {
            is_error: "1".to_string(),
            ..Self::raw(from, to, wei, timestamp, hash)
        }
    }

    pub fn accepted(
        from: &Address,
        to: &Address,
        wei: u128,
        hash: &str,
    ) -> AcceptedTransaction {
        AcceptedTransaction {
            from: from.clone(),
            to: to.clone(),
            wei,
            value: crate::model::EthAmount::from_wei(wei),
            hash: hash.to_string(),
            timestamp: NOW,
            time: format_timestamp(NOW, &chrono_tz::UTC),
        }
    }
}
