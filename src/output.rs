use crate::cli::ShowFormat;
use crate::codec;
use crate::column::ResultColumn;
use crate::error::RowsetError;
use crate::result::BaseResult;
use std::path::Path;

/// Print rendered output to stdout.
pub fn print_result(text: &str) {
    println!("{}", text);
}

/// Print error to stderr in the contract format: error: <category>: <message>
pub fn print_error(err: &RowsetError) {
    eprintln!("error: {}", err);
}

/// Render a result in one of the `show` layouts.
pub fn render_result(result: &BaseResult, format: ShowFormat) -> Result<String, RowsetError> {
    match format {
        ShowFormat::Json => result.as_json_string(),
        ShowFormat::Dict => {
            let mut map = serde_json::Map::new();
            for (name, values) in result.as_dict()? {
                let encoded = values
                    .iter()
                    .map(codec::encode_value)
                    .collect::<Result<Vec<_>, _>>()?;
                map.insert(name, serde_json::Value::Array(encoded));
            }
            to_string(&serde_json::Value::Object(map))
        }
        ShowFormat::Rows => Ok(result
            .iter()
            .map(|row| row.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Render a column as a JSON array, or as an SQL literal list.
pub fn render_column(column: &ResultColumn, literal: bool) -> Result<String, RowsetError> {
    if literal {
        return Ok(column.as_literal_list());
    }
    let encoded = column
        .iter()
        .map(codec::encode_value)
        .collect::<Result<Vec<_>, _>>()?;
    to_string(&serde_json::Value::Array(encoded))
}

/// Print file output summary to stdout as a JSON object with
/// rows_written (number) and file (string).
pub fn print_summary(rows: usize, path: &Path) -> Result<(), RowsetError> {
    println!("{}", summary_json(rows, path)?);
    Ok(())
}

/// The summary object `print_summary` prints.
pub fn summary_json(rows: usize, path: &Path) -> Result<String, RowsetError> {
    let mut map = serde_json::Map::new();
    map.insert(
        "rows_written".to_string(),
        serde_json::Value::Number(serde_json::Number::from(rows)),
    );
    map.insert(
        "file".to_string(),
        serde_json::Value::String(path.display().to_string()),
    );
    to_string(&serde_json::Value::Object(map))
}

/// Write rendered text to a file.
pub fn write_file(text: &str, path: &Path) -> Result<(), RowsetError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(RowsetError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("parent directory does not exist: {}", parent.display()),
        )));
    }
    std::fs::write(path, text)?;
    Ok(())
}

fn to_string(value: &serde_json::Value) -> Result<String, RowsetError> {
    serde_json::to_string(value).map_err(|e| RowsetError::Format {
        message: e.to_string(),
    })
}
