use std::collections::HashSet;
use std::sync::Arc;

use chrono_tz::Tz;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::TracerConfig;
use crate::constants::SECONDS_PER_DAY;
use crate::error::TraceError;
use crate::ledger::LedgerClient;
use crate::ledger::Throttle;
use crate::model::AcceptedTransaction;
use crate::model::Address;
use crate::model::RawTransaction;

#[derive(Debug, Clone, PartialEq)]
pub struct TraceOptions {
    pub max_depth: usize,
    pub auto_depth: bool,
    pub days_limit: Option<f64>,
    pub max_addresses: Option<usize>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self::from(&TracerConfig::default())
    }
}

impl From<&TracerConfig> for TraceOptions {
    fn from(config: &TracerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            auto_depth: config.auto_depth,
            days_limit: config.days_limit,
            max_addresses: config.max_addresses,
        }
    }
}

impl TraceOptions {
    /// Earliest timestamp kept, `None` when there is no window
    pub fn cutoff(
        &self,
        now: i64,
    ) -> Option<f64> {
        self.days_limit.map(|days| now as f64 - days * SECONDS_PER_DAY)
    }

    fn depth_exceeded(
        &self,
        depth: usize,
    ) -> bool {
        depth > self.max_depth && !self.auto_depth
    }

    fn expands_children_at(
        &self,
        depth: usize,
    ) -> bool {
        self.auto_depth || depth < self.max_depth
    }
}

/// Addresses already expanded during one trace, compared case-insensitively
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    addresses: HashSet<String>,
}

impl VisitedSet {
    /// `false` if the address was already present
    pub fn insert(
        &mut self,
        address: &Address,
    ) -> bool {
        self.addresses.insert(address.canonical())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }
}

// Accepted transactions of one expanded address, not yet emitted
struct Frame {
    pending: std::vec::IntoIter<AcceptedTransaction>,
    depth:   usize,
}

// Per-trace mutable state, dropped when the trace returns
struct TraceState {
    visited:        VisitedSet,
    cutoff:         Option<f64>,
    failed_fetches: usize,
    truncated:      bool,
}

/// Depth-first walk over outgoing transfers.
///
/// One fetch is in flight at a time and the throttle is awaited before every
/// child expansion. Results are pre-order: a transfer is followed by
/// everything found below its recipient, then by its next sibling.
pub struct TransferTracer {
    ledger:   Arc<dyn LedgerClient>,
    throttle: Arc<dyn Throttle>,
    timezone: Tz,
}

impl TransferTracer {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        throttle: Arc<dyn Throttle>,
    ) -> Self {
        Self {
            ledger,
            throttle,
            timezone: chrono_tz::UTC,
        }
    }

    pub fn with_timezone(
        mut self,
        timezone: Tz,
    ) -> Self {
        self.timezone = timezone;
        self
    }

    pub async fn trace(
        &self,
        seed: &Address,
        options: &TraceOptions,
    ) -> Result<Vec<AcceptedTransaction>, TraceError> {
        self.trace_at(seed, options, chrono::Utc::now().timestamp()).await
    }

    /// Same as [`Self::trace`] with the window anchored at `now` (unix seconds)
    pub async fn trace_at(
        &self,
        seed: &Address,
        options: &TraceOptions,
        now: i64,
    ) -> Result<Vec<AcceptedTransaction>, TraceError> {
        info!(
            "trace_started::seed::{}::max_depth::{}::auto_depth::{}::days_limit::{:?}",
            seed, options.max_depth, options.auto_depth, options.days_limit
        );

        let mut state = TraceState {
            visited: VisitedSet::default(),
            cutoff: options.cutoff(now),
            failed_fetches: 0,
            truncated: false,
        };
        let mut results = Vec::new();
        let mut stack = Vec::new();

        if let Some(frame) = self.expand(seed, 0, options, &mut state, true).await? {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(tx) = frame.pending.next() else {
                stack.pop();
                continue;
            };
            let depth = frame.depth;
            let recipient = tx.to.clone();
            results.push(tx);

            if options.expands_children_at(depth) {
                self.throttle.acquire().await;
                if let Some(child) = self.expand(&recipient, depth + 1, options, &mut state, false).await? {
                    stack.push(child);
                }
            }
        }

        info!(
            "trace_completed::seed::{}::transactions::{}::addresses::{}::failed_fetches::{}::truncated::{}",
            seed,
            results.len(),
            state.visited.len(),
            state.failed_fetches,
            state.truncated
        );

        Ok(results)
    }

    async fn expand(
        &self,
        address: &Address,
        depth: usize,
        options: &TraceOptions,
        state: &mut TraceState,
        is_seed: bool,
    ) -> Result<Option<Frame>, TraceError> {
        if options.depth_exceeded(depth) {
            return Ok(None);
        }

        if !state.visited.insert(address) {
            debug!("already_visited::address::{}::depth::{}", address, depth);
            return Ok(None);
        }

        if let Some(max_addresses) = options.max_addresses {
            if state.visited.len() > max_addresses {
                if !state.truncated {
                    warn!("max_addresses_reached::{}::expansion_stopped", max_addresses);
                    state.truncated = true;
                }
                return Ok(None);
            }
        }

        let raw = match self.ledger.fetch_transactions(address).await {
            Ok(page) => page.into_transactions(),
            Err(source) if is_seed => {
                return Err(TraceError::Ledger {
                    address: address.to_string(),
                    source,
                });
            },
            Err(e) => {
                warn!("fetch_failed::address::{}::depth::{}::error::{}", address, depth, e);
                state.failed_fetches += 1;
                return Ok(None);
            },
        };

        let fetched = raw.len();
        let accepted: Vec<AcceptedTransaction> = raw
            .iter()
            .filter(|tx| accepts(tx, address, state.cutoff))
            .filter_map(|tx| AcceptedTransaction::from_raw(tx, &self.timezone))
            .collect();

        debug!(
            "expanded::address::{}::depth::{}::fetched::{}::accepted::{}",
            address,
            depth,
            fetched,
            accepted.len()
        );

        Ok(Some(Frame {
            pending: accepted.into_iter(),
            depth,
        }))
    }
}

fn accepts(
    tx: &RawTransaction,
    address: &Address,
    cutoff: Option<f64>,
) -> bool {
    if !tx.is_outgoing_from(address) || !tx.is_success() {
        return false;
    }
    match (tx.timestamp(), cutoff) {
        (Some(timestamp), Some(cutoff)) => timestamp as f64 >= cutoff,
        (Some(_), None) => true,
        (None, _) => false,
    }
}
