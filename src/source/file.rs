//! Flat-file readers: CSV, TSV and JSON arrays of objects, plain or as the
//! first file inside a zip archive.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use super::FileResult;
use super::cell::infer_cell;
use crate::codec::decode_value;
use crate::error::RowsetError;
use crate::format_detect::{detect_source_type, is_zip};
use crate::record::Record;
use crate::value::Value;

/// Supported input file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Tsv,
    Json,
}

impl FileType {
    /// Resolve an explicit type name (`csv`, `tsv`, `json`).
    pub fn from_name(name: &str) -> Result<Self, RowsetError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(FileType::Csv),
            "tsv" => Ok(FileType::Tsv),
            "json" => Ok(FileType::Json),
            other => Err(RowsetError::UnsupportedSourceType {
                message: format!("unknown file type \"{other}\" (supported: csv, tsv, json)"),
            }),
        }
    }
}

/// How delimited text is split and typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    pub delimiter: u8,
    /// When false, columns are named `column_1..n`.
    pub has_headers: bool,
    /// Cells equal to one of these become `Null`.
    pub null_values: Vec<String>,
    /// Guess integer, float, boolean and ISO date/datetime cells; otherwise
    /// every non-null cell stays text.
    pub infer_types: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            null_values: vec![String::new()],
            infer_types: false,
        }
    }
}

impl ReaderOptions {
    fn decode(&self, cell: &str) -> Value {
        if self.null_values.iter().any(|n| n == cell) {
            Value::Null
        } else if self.infer_types {
            infer_cell(cell)
        } else {
            Value::Text(cell.to_string())
        }
    }
}

impl FileResult {
    /// Read delimited text. Records whose field count differs from the
    /// header fail with `ShapeMismatch`.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        opts: &ReaderOptions,
    ) -> Result<Self, RowsetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(opts.delimiter)
            .has_headers(opts.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut keys: Vec<String> = if opts.has_headers {
            csv_reader
                .headers()
                .map_err(csv_error)?
                .iter()
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(csv_error)?;
            if !opts.has_headers && keys.is_empty() {
                keys = (1..=record.len()).map(|i| format!("column_{i}")).collect();
            }
            rows.push(record.iter().map(|cell| opts.decode(cell)).collect::<Vec<_>>());
        }

        Self::from_rows(keys, rows)
    }

    /// Read a JSON array of flat objects.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RowsetError> {
        let json: serde_json::Value =
            serde_json::from_reader(reader).map_err(|e| RowsetError::Source {
                message: format!("failed to parse JSON: {e}"),
            })?;

        let serde_json::Value::Array(items) = json else {
            return Err(RowsetError::Source {
                message: "expected a JSON array of objects".to_string(),
            });
        };

        let records = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let serde_json::Value::Object(map) = item else {
                    return Err(RowsetError::Source {
                        message: format!("element {i} is not a JSON object"),
                    });
                };
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), decode_value(v)?)))
                    .collect::<Result<Record, RowsetError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_records(records)
    }
}

/// Read `path` as a [`FileResult`]. The type is `file_type` when given,
/// otherwise detected from the extension.
///
/// A `.zip` path is read through its first file entry. Without an explicit
/// type, the type comes from the archive name (`data.csv.zip`) or, failing
/// that, from the entry name.
pub fn open(
    path: &Path,
    file_type: Option<&str>,
    opts: &ReaderOptions,
) -> Result<FileResult, RowsetError> {
    if is_zip(path) {
        return open_zip(path, file_type, opts);
    }

    let file_type = match file_type {
        Some(name) => FileType::from_name(name)?,
        None => detect_source_type(path)?,
    };
    debug!(path = %path.display(), ?file_type, "opening file source");

    read(BufReader::new(File::open(path)?), file_type, opts)
}

fn open_zip(
    path: &Path,
    file_type: Option<&str>,
    opts: &ReaderOptions,
) -> Result<FileResult, RowsetError> {
    let mut archive = zip::ZipArchive::new(BufReader::new(File::open(path)?)).map_err(zip_error)?;

    let mut first = None;
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(zip_error)?;
        if !entry.is_dir() {
            first = Some((index, entry.name().to_string()));
            break;
        }
    }
    let Some((index, name)) = first else {
        return Err(RowsetError::Source {
            message: format!("zip archive {} has no files", path.display()),
        });
    };

    let file_type = match file_type {
        Some(t) => FileType::from_name(t)?,
        None => detect_source_type(path).or_else(|_| detect_source_type(Path::new(&name)))?,
    };
    debug!(path = %path.display(), entry = %name, ?file_type, "opening zipped file source");

    let entry = archive.by_index(index).map_err(zip_error)?;
    read(BufReader::new(entry), file_type, opts)
}

fn read<R: Read>(
    reader: R,
    file_type: FileType,
    opts: &ReaderOptions,
) -> Result<FileResult, RowsetError> {
    match file_type {
        FileType::Csv => FileResult::from_csv_reader(reader, opts),
        FileType::Tsv => {
            let opts = ReaderOptions {
                delimiter: b'\t',
                ..opts.clone()
            };
            FileResult::from_csv_reader(reader, &opts)
        }
        FileType::Json => FileResult::from_json_reader(reader),
    }
}

fn zip_error(e: zip::result::ZipError) -> RowsetError {
    RowsetError::Source {
        message: format!("failed to read zip archive: {e}"),
    }
}

fn csv_error(e: csv::Error) -> RowsetError {
    RowsetError::Source {
        message: format!("failed to read CSV: {e}"),
    }
}
