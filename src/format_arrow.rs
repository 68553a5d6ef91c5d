use std::fs::File;
use std::path::Path;

use arrow::ipc::writer::FileWriter;

use crate::error::RowsetError;
use crate::result::BaseResult;

/// Write a result as an Arrow IPC file with typed columns.
pub fn write_arrow(result: &BaseResult, path: &Path) -> Result<(), RowsetError> {
    let batch = result.as_dataframe()?;

    let file = File::create(path)?;
    let mut writer =
        FileWriter::try_new(file, batch.schema_ref()).map_err(|e| RowsetError::Format {
            message: format!("failed to create Arrow IPC writer: {e}"),
        })?;

    if batch.num_rows() > 0 {
        writer.write(&batch).map_err(|e| RowsetError::Format {
            message: format!("failed to write Arrow IPC data: {e}"),
        })?;
    }

    writer.finish().map_err(|e| RowsetError::Format {
        message: format!("failed to finalize Arrow IPC file: {e}"),
    })?;

    Ok(())
}
