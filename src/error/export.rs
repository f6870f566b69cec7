use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No data to export")]
    EmptyGraph,

    #[error("Failed to write csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
