use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing::warn;

use super::tracer::TraceOptions;
use super::tracer::TransferTracer;
use crate::Result;
use crate::config::Config;
use crate::config::TracerConfig;
use crate::config::load_config_or_default;
use crate::err_with_loc;
use crate::error::ExportError;
use crate::error::TraceError;
use crate::export::export_csv;
use crate::export::export_json;
use crate::export::write_json;
use crate::ledger::EtherscanClient;
use crate::ledger::LedgerClient;
use crate::ledger::ReplayLedger;
use crate::ledger::Throttle;
use crate::ledger::throttle::make_throttle;
use crate::model::AcceptedTransaction;
use crate::model::Address;
use crate::model::GraphData;
use crate::model::NodeKeying;
use crate::tracing::setup_tracing;

/// Trace outgoing ETH transfers from an address and build their graph
#[derive(Debug, Clone, Parser)]
#[command(name = "qaif", version)]
pub struct QaifArgs {
    /// Seed address (0x followed by 40 hex digits)
    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Follow transfers until the time window or visited set stops the walk
    #[arg(long)]
    pub auto_depth: bool,

    /// Only keep transfers from the last N days
    #[arg(long)]
    pub days: Option<f64>,

    #[arg(long)]
    pub max_addresses: Option<usize>,

    #[arg(long, default_value = "Config.toml")]
    pub config: PathBuf,

    /// Answer from a recorded `{ address: [txlist records] }` file instead of the API
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Write the graph document here instead of stdout
    #[arg(long)]
    pub json: Option<PathBuf>,

    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl QaifArgs {
    /// Command line values win over the config file
    pub fn apply(
        &self,
        tracer: &mut TracerConfig,
    ) {
        if let Some(max_depth) = self.max_depth {
            tracer.max_depth = max_depth;
        }
        if self.auto_depth {
            tracer.auto_depth = true;
        }
        if let Some(days) = self.days {
            tracer.days_limit = Some(days);
        }
        if let Some(max_addresses) = self.max_addresses {
            tracer.max_addresses = Some(max_addresses);
        }
    }
}

#[derive(Debug, Clone)]
pub struct TraceOutcome {
    pub seed:         Address,
    pub transactions: Vec<AcceptedTransaction>,
    pub graph:        GraphData,
}

pub struct Qaif {
    pub config: Config,
    tracer:     TransferTracer,
}

impl Qaif {
    pub async fn run() -> Result<()> {
        Self::run_with(QaifArgs::parse()).await
    }

    pub async fn run_with(args: QaifArgs) -> Result<()> {
        let mut config = load_config_or_default(&args.config)?;
        args.apply(&mut config.tracer);
        config.validate()?;

        let _log_guard = setup_tracing("qaif", &config.logging)?;
        info!("Starting Qaif (قائف): The Tracker");

        // Reject bad input before any ledger is built
        let seed = Address::parse(args.address.trim())?;
        let ledger = Self::make_ledger(&config, args.replay.as_deref())?;
        info!("ledger::created::replay::{}", args.replay.is_some());

        let qaif = Qaif::new(config, ledger)?;

        let outcome = tokio::select! {
            result = qaif.trace_address(seed.as_str()) => result?,
            _ = tokio::signal::ctrl_c() => {
                info!("termination_signal::trace_cancelled");
                return Ok(());
            },
        };

        qaif.write_outputs(&outcome, args.json.as_deref(), args.csv.as_deref())?;

        info!("qaif::shutdown");
        Ok(())
    }

    pub fn new(
        config: Config,
        ledger: Arc<dyn LedgerClient>,
    ) -> Result<Self> {
        let throttle = make_throttle(&config.ledger.throttle);
        Self::with_throttle(config, ledger, throttle)
    }

    pub fn with_throttle(
        config: Config,
        ledger: Arc<dyn LedgerClient>,
        throttle: Arc<dyn Throttle>,
    ) -> Result<Self> {
        let timezone = config.tracer.timezone()?;
        let tracer = TransferTracer::new(ledger, throttle).with_timezone(timezone);
        Ok(Self { config, tracer })
    }

    fn make_ledger(
        config: &Config,
        replay: Option<&Path>,
    ) -> Result<Arc<dyn LedgerClient>> {
        match replay {
            Some(path) => {
                let ledger = ReplayLedger::from_json_file(path)?;
                info!("replay_loaded::{}::addresses::{}", path.display(), ledger.address_count());
                Ok(Arc::new(ledger))
            },
            None => Ok(Arc::new(EtherscanClient::from_config(Arc::new(config.ledger.clone()))?)),
        }
    }

    pub fn node_keying(&self) -> NodeKeying {
        if self.config.tracer.merge_case_variants { NodeKeying::Canonical } else { NodeKeying::Exact }
    }

    /// Validates the address, traces from it and builds the graph
    pub async fn trace_address(
        &self,
        raw_address: &str,
    ) -> std::result::Result<TraceOutcome, TraceError> {
        let seed = Address::parse(raw_address)?;
        let options = TraceOptions::from(&self.config.tracer);

        let transactions = self.tracer.trace(&seed, &options).await?;
        let graph = GraphData::build(&transactions, self.node_keying());

        info!(
            "trace_summary::seed::{}::transactions::{}::nodes::{}::links::{}",
            seed,
            transactions.len(),
            graph.nodes.len(),
            graph.links.len()
        );

        Ok(TraceOutcome {
            seed,
            transactions,
            graph,
        })
    }

    pub fn write_outputs(
        &self,
        outcome: &TraceOutcome,
        json: Option<&Path>,
        csv: Option<&Path>,
    ) -> Result<()> {
        match json {
            Some(path) => export_json(&outcome.graph, path)?,
            None => write_json(&outcome.graph, std::io::stdout().lock())?,
        }

        if let Some(path) = csv {
            match export_csv(&outcome.graph, path) {
                Ok(()) => {},
                Err(ExportError::EmptyGraph) => {
                    warn!("csv_skipped::seed::{}::no_data_to_export", outcome.seed);
                },
                Err(e) => return Err(err_with_loc!(e)),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ledger::FixedDelay;
    use crate::test_utils::fixtures::ONE_ETH;
    use crate::test_utils::fixtures::TestFixtures;
    use crate::test_utils::mocks::MockLedgers;

    fn qaif(
        config: Config,
        ledger: impl LedgerClient + 'static,
    ) -> Qaif {
        Qaif::with_throttle(config, Arc::new(ledger), Arc::new(FixedDelay::none())).unwrap()
    }

    #[tokio::test]
    async fn invalid_address_never_reaches_the_ledger() {
        let qaif = qaif(Config::default(), MockLedgers::untouched());

        let result = qaif.trace_address("0x123").await;

        assert!(matches!(result, Err(TraceError::InvalidAddress(raw)) if raw == "0x123"));
    }

    #[tokio::test]
    async fn case_variants_merge_when_configured() {
        let a = TestFixtures::address(1);
        let b = TestFixtures::address(2);
        let b_upper = Address::parse(&format!("0x{}", b.as_str()[2..].to_ascii_uppercase())).unwrap();
        let ledger = ReplayLedger::new().with_history(&a, vec![
            TestFixtures::raw(&a, &b, ONE_ETH, chrono::Utc::now().timestamp(), "0x01"),
            TestFixtures::raw(&a, &b_upper, ONE_ETH, chrono::Utc::now().timestamp(), "0x02"),
        ]);
        let mut config = Config::default();
        config.tracer.max_depth = 0;
        config.tracer.merge_case_variants = true;

        let outcome = qaif(config, ledger).trace_address(a.as_str()).await.unwrap();

        assert_eq!(outcome.transactions.len(), 2);
        assert_eq!(outcome.graph.nodes.len(), 2);
        assert_eq!(outcome.graph.nodes[1].received.to_string(), "2.0000");
        assert_eq!(outcome.graph.links[1].multiline_count, 2);
    }

    #[tokio::test]
    async fn exact_keying_keeps_case_variants_apart() {
        let a = TestFixtures::address(1);
        let b = TestFixtures::address(2);
        let b_upper = Address::parse(&format!("0x{}", b.as_str()[2..].to_ascii_uppercase())).unwrap();
        let ledger = ReplayLedger::new().with_history(&a, vec![
            TestFixtures::raw(&a, &b, ONE_ETH, chrono::Utc::now().timestamp(), "0x01"),
            TestFixtures::raw(&a, &b_upper, ONE_ETH, chrono::Utc::now().timestamp(), "0x02"),
        ]);
        let mut config = Config::default();
        config.tracer.max_depth = 0;

        let outcome = qaif(config, ledger).trace_address(a.as_str()).await.unwrap();

        assert_eq!(outcome.graph.nodes.len(), 3);
        assert!(outcome.graph.links.iter().all(|link| link.multiline_count == 1));
    }

    #[tokio::test]
    async fn empty_trace_skips_csv_but_writes_json() {
        let a = TestFixtures::address(1);
        let qaif = qaif(Config::default(), ReplayLedger::new());
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("graph.json");
        let csv_path = dir.path().join("graph.csv");

        let outcome = qaif.trace_address(a.as_str()).await.unwrap();
        qaif.write_outputs(&outcome, Some(json_path.as_path()), Some(csv_path.as_path())).unwrap();

        assert!(outcome.graph.is_empty());
        assert!(json_path.exists());
        assert!(!csv_path.exists());
    }

    #[test]
    fn command_line_overrides_config() {
        let args = QaifArgs::try_parse_from([
            "qaif",
            "--address",
            "0x0000000000000000000000000000000000000001",
            "--max-depth",
            "7",
            "--auto-depth",
            "--days",
            "2.5",
        ])
        .unwrap();
        let mut tracer = TracerConfig::default();

        args.apply(&mut tracer);

        assert_eq!(tracer.max_depth, 7);
        assert!(tracer.auto_depth);
        assert_eq!(tracer.days_limit, Some(2.5));
        assert_eq!(tracer.max_addresses, TracerConfig::default().max_addresses);
        assert_eq!(args.config, PathBuf::from("Config.toml"));
        assert!(args.json.is_none());
    }

    #[test]
    fn address_is_required() {
        assert!(QaifArgs::try_parse_from(["qaif"]).is_err());
    }
}
