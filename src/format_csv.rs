use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::RowsetError;
use crate::result::BaseResult;
use crate::value::Value;

/// Write a result as RFC 4180 CSV: a header row, CRLF line endings, and
/// nulls as empty fields.
pub fn write_csv_to_writer<W: Write>(result: &BaseResult, writer: W) -> Result<(), RowsetError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(result.columns()).map_err(csv_error)?;

    for row in result.iter() {
        let fields = result
            .columns()
            .iter()
            .map(|name| row.value(name).map(field_text))
            .collect::<Result<Vec<_>, _>>()?;
        csv_writer.write_record(&fields).map_err(csv_error)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a result as a CSV file at `path`.
pub fn write_csv(result: &BaseResult, path: &Path) -> Result<(), RowsetError> {
    let file = File::create(path)?;
    write_csv_to_writer(result, file)
}

fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_error(e: csv::Error) -> RowsetError {
    RowsetError::Format {
        message: format!("failed to write CSV: {e}"),
    }
}
