use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::constants::CSV_HASH_SEPARATOR;
use crate::constants::CSV_HEADER;
use crate::error::ExportError;
use crate::model::GraphData;

/// One row per node: address, short label, totals, and the hashes of every
/// link touching it.
pub fn write_csv<W: Write>(
    data: &GraphData,
    writer: W,
) -> Result<(), ExportError> {
    if data.is_empty() {
        return Err(ExportError::EmptyGraph);
    }

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for node in &data.nodes {
        let sent = node.sent.to_string();
        let received = node.received.to_string();
        let hashes = data.hashes_touching(&node.id).join(CSV_HASH_SEPARATOR);
        csv_writer.write_record([
            node.id.as_str(),
            node.label.as_str(),
            sent.as_str(),
            received.as_str(),
            hashes.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv(
    data: &GraphData,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    if data.is_empty() {
        return Err(ExportError::EmptyGraph);
    }
    let file = File::create(path.as_ref())?;
    write_csv(data, file)?;
    tracing::info!("csv_exported::{}::nodes::{}", path.as_ref().display(), data.nodes.len());
    Ok(())
}
