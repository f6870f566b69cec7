/// ======================= Ledger =======================
/// Etherscan account API endpoint
pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/api";

/// Environment variable holding the Etherscan API key when the config leaves it blank
pub const ETHERSCAN_API_KEY_ENV: &str = "ETHERSCAN_API_KEY";

/// Status value of a successful Etherscan response
pub const ETHERSCAN_STATUS_OK: &str = "1";

/// `isError` value of a transaction that executed successfully
pub const TX_SUCCESS_FLAG: &str = "0";

pub const DEFAULT_START_BLOCK: u64 = 0;
pub const DEFAULT_END_BLOCK: u64 = 99_999_999;

/// ======================= Units =======================
/// Decimal places kept for displayed ether amounts
pub const ETH_DISPLAY_DECIMALS: u32 = 4;

/// Wei in one displayed unit (10^-4 ETH)
pub const WEI_PER_DISPLAY_UNIT: u128 = 100_000_000_000_000;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// ======================= Traversal =======================
/// Gap imposed before every child fetch
pub const DEFAULT_FETCH_DELAY_MS: u64 = 200;

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Upper bound on expanded addresses per trace
pub const DEFAULT_MAX_ADDRESSES: usize = 2_000;

/// ======================= Export =======================
pub const CSV_HEADER: [&str; 5] = [
    "Address",
    "Short Address",
    "Total Sent (ETH)",
    "Total Received (ETH)",
    "Transaction Hashes",
];

pub const CSV_HASH_SEPARATOR: &str = ";";
