use std::path::Path;

use crate::error::RowsetError;
use crate::source::file::FileType;

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
    Arrow,
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// True for `.zip` archives.
pub fn is_zip(path: &Path) -> bool {
    extension(path).as_deref() == Some("zip")
}

/// Detect an input file type from a path extension.
///
/// - `.csv` → Csv
/// - `.tsv`, `.tab` → Tsv
/// - `.json` → Json
/// - `.zip` → the type of the name underneath (`data.csv.zip` → Csv)
/// - Anything else, or no extension → `UnsupportedSourceType`
pub fn detect_source_type(path: &Path) -> Result<FileType, RowsetError> {
    if is_zip(path) {
        return detect_source_type(&path.with_extension(""));
    }
    match extension(path).as_deref() {
        Some("csv") => Ok(FileType::Csv),
        Some("tsv" | "tab") => Ok(FileType::Tsv),
        Some("json") => Ok(FileType::Json),
        Some(other) => Err(RowsetError::UnsupportedSourceType {
            message: format!(
                "cannot read \".{other}\" files (supported: .csv, .tsv, .tab, .json)"
            ),
        }),
        None => Err(RowsetError::UnsupportedSourceType {
            message: format!("cannot detect file type of {}", path.display()),
        }),
    }
}

/// Detect the output format from a path extension.
pub fn detect_output_format(path: &Path) -> Result<OutputFormat, RowsetError> {
    match extension(path).as_deref() {
        Some("json") => Ok(OutputFormat::Json),
        Some("csv") => Ok(OutputFormat::Csv),
        Some("arrow") => Ok(OutputFormat::Arrow),
        other => Err(RowsetError::Format {
            message: format!(
                "unsupported output format \"{}\" (supported: .json, .csv, .arrow)",
                other.map(|e| format!(".{e}")).unwrap_or_default()
            ),
        }),
    }
}
