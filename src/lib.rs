pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod export;
pub mod ledger;
pub mod model;
pub mod tracing;
pub mod utils;

pub use engine::*;
pub use error::*;

pub use error::{ConfigError, ExportError, LedgerError, TraceError};

// Test utilities - only compiled during testing
#[cfg(test)]
pub mod test_utils {
    pub mod assertions;
    pub mod fixtures;
    pub mod mocks;
}

pub use error::Result;
