use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    // Root of the rolling log files; `debug/` and `error/` live below it
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".logs"),
        }
    }
}

impl LoggingConfig {
    pub fn debug_dir(&self) -> PathBuf {
        self.directory.join("debug")
    }

    pub fn error_dir(&self) -> PathBuf {
        self.directory.join("error")
    }
}
