use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use serde::Serialize;

use super::address::Address;
use super::amount::EthAmount;
use crate::constants::TX_SUCCESS_FLAG;

/// Transaction record as returned by the ledger's `txlist` action.
///
/// Every field arrives as a string; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub value: String,
    pub hash: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    #[serde(rename = "isError", default)]
    pub is_error: String,
}

impl RawTransaction {
    pub fn is_outgoing_from(
        &self,
        address: &Address,
    ) -> bool {
        address.eq_ignore_case(&self.from)
    }

    pub fn is_success(&self) -> bool {
        self.is_error == TX_SUCCESS_FLAG
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.time_stamp.trim().parse::<i64>().ok()
    }

    pub fn wei(&self) -> Option<u128> {
        self.value.trim().parse::<u128>().ok()
    }
}

/// Transaction kept by a trace, with display fields attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedTransaction {
    pub from: Address,
    pub to: Address,
    pub wei: u128,
    pub value: EthAmount,
    pub hash: String,
    pub timestamp: i64,
    pub time: String,
}

impl AcceptedTransaction {
    /// `None` when the record has no valid counterparty, amount or timestamp
    pub fn from_raw(
        raw: &RawTransaction,
        timezone: &Tz,
    ) -> Option<Self> {
        let from = Address::parse(&raw.from).ok()?;
        let to = Address::parse(&raw.to).ok()?;
        let wei = raw.wei()?;
        let timestamp = raw.timestamp()?;

        Some(Self {
            from,
            to,
            wei,
            value: EthAmount::from_wei(wei),
            hash: raw.hash.clone(),
            timestamp,
            time: format_timestamp(timestamp, timezone),
        })
    }
}

pub fn format_timestamp(
    timestamp: i64,
    timezone: &Tz,
) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(timezone).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        None => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawTransaction {
        RawTransaction {
            from: "0xAAAA000000000000000000000000000000000001".to_string(),
            to: "0xbbbb000000000000000000000000000000000002".to_string(),
            value: "1000000000000000000".to_string(),
            hash: "0xhash".to_string(),
            time_stamp: "1700000000".to_string(),
            is_error: "0".to_string(),
        }
    }

    #[test]
    fn decodes_etherscan_record() {
        let json = r#"{
            "blockNumber": "18573057",
            "timeStamp": "1700000000",
            "hash": "0xhash",
            "from": "0xaaaa000000000000000000000000000000000001",
            "to": "0xbbbb000000000000000000000000000000000002",
            "value": "1000000000000000000",
            "gas": "21000",
            "isError": "0",
            "txreceipt_status": "1"
        }"#;
        let tx: RawTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.timestamp(), Some(1_700_000_000));
        assert_eq!(tx.wei(), Some(1_000_000_000_000_000_000));
        assert!(tx.is_success());
    }

    #[test]
    fn outgoing_check_ignores_case() {
        let seed = Address::parse("0xaaaa000000000000000000000000000000000001").unwrap();
        assert!(raw().is_outgoing_from(&seed));
    }

    #[test]
    fn accepted_transaction_keeps_original_case() {
        let accepted = AcceptedTransaction::from_raw(&raw(), &chrono_tz::UTC).unwrap();
        assert_eq!(accepted.from.as_str(), "0xAAAA000000000000000000000000000000000001");
        assert_eq!(accepted.value.to_string(), "1.0000");
        assert_eq!(accepted.time, "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn contract_creation_has_no_counterparty() {
        let mut creation = raw();
        creation.to = String::new();
        assert!(AcceptedTransaction::from_raw(&creation, &chrono_tz::UTC).is_none());
    }

    #[test]
    fn timestamps_render_in_display_timezone() {
        assert_eq!(format_timestamp(1_700_000_000, &chrono_tz::Asia::Tokyo), "2023-11-15 07:13:20 JST");
    }
}
