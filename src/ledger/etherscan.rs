use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use tracing::warn;
use url::Url;

use super::LedgerClient;
use super::LedgerPage;
use crate::config::LedgerConfig;
use crate::constants::ETHERSCAN_STATUS_OK;
use crate::error::LedgerError;
use crate::error::TraceError;
use crate::model::Address;
use crate::model::RawTransaction;
use crate::utils::calculate_backoff_with_jitter;
use crate::utils::is_retryable_error;

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status:  String,
    #[serde(default)]
    message: String,
    // Transaction array on success, an explanation string otherwise
    #[serde(default)]
    result:  serde_json::Value,
}

impl EtherscanResponse {
    fn notice(&self) -> String {
        match &self.result {
            serde_json::Value::String(text) if !text.is_empty() => format!("{}: {}", self.message, text),
            _ => self.message.clone(),
        }
    }
}

/// Etherscan-compatible `account/txlist` client
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http:    reqwest::Client,
    config:  Arc<LedgerConfig>,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(
        config: Arc<LedgerConfig>,
        api_key: String,
    ) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self { http, config, api_key })
    }

    /// Builds a client with the configured or environment API key
    pub fn from_config(config: Arc<LedgerConfig>) -> crate::Result<Self> {
        let api_key = config.resolve_api_key().ok_or(TraceError::MissingApiKey)?;
        Ok(Self::new(config, api_key)?)
    }

    pub fn request_url(
        &self,
        address: &Address,
    ) -> Result<Url, LedgerError> {
        let start_block = self.config.start_block.to_string();
        let end_block = self.config.end_block.to_string();
        let url = Url::parse_with_params(&self.config.base_url, &[
            ("module", "account"),
            ("action", "txlist"),
            ("address", address.as_str()),
            ("startblock", start_block.as_str()),
            ("endblock", end_block.as_str()),
            ("sort", self.config.sort.as_str()),
            ("apikey", self.api_key.as_str()),
        ])?;
        Ok(url)
    }

    async fn request_once(
        &self,
        url: &Url,
    ) -> Result<EtherscanResponse, LedgerError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Status(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl LedgerClient for EtherscanClient {
    async fn fetch_transactions(
        &self,
        address: &Address,
    ) -> Result<LedgerPage, LedgerError> {
        let url = self.request_url(address)?;
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            debug!("fetching_txlist::address::{}::attempt::{}", address, attempt);

            match self.request_once(&url).await {
                Ok(response) if response.status == ETHERSCAN_STATUS_OK => {
                    let transactions: Vec<RawTransaction> = serde_json::from_value(response.result)?;
                    debug!("fetched_txlist::address::{}::count::{}", address, transactions.len());
                    return Ok(LedgerPage::Transactions(transactions));
                },
                Ok(response) => {
                    let notice = response.notice();
                    if is_retryable_error(&notice) && attempt < max_retries {
                        warn!("provider_throttled::address::{}::notice::{}::attempt::{}", address, notice, attempt);
                    } else {
                        debug!("no_txlist_data::address::{}::status::{}::notice::{}", address, response.status, notice);
                        return Ok(LedgerPage::NoData { message: notice });
                    }
                },
                Err(e) => {
                    if (e.is_retryable() || is_retryable_error(&e.to_string())) && attempt < max_retries {
                        warn!("fetch_txlist_failed::address::{}::error::{}::attempt::{}", address, e, attempt);
                    } else {
                        return Err(e);
                    }
                },
            }

            let backoff_delay = calculate_backoff_with_jitter(
                attempt,
                self.config.base_retry_delay_ms,
                self.config.max_retry_delay_ms,
            );
            debug!(
                "retrying_txlist_after_backoff::address::{}::delay_ms::{}",
                address,
                backoff_delay.as_millis()
            );
            tokio::time::sleep(backoff_delay).await;
            attempt += 1;
        }
    }
}
