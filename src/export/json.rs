use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::model::GraphData;

pub fn to_json_string(data: &GraphData) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn write_json<W: Write>(
    data: &GraphData,
    mut writer: W,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn export_json(
    data: &GraphData,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let file = File::create(path.as_ref())?;
    write_json(data, BufWriter::new(file))?;
    tracing::info!(
        "json_exported::{}::nodes::{}::links::{}",
        path.as_ref().display(),
        data.nodes.len(),
        data.links.len()
    );
    Ok(())
}
