//! Decoding of a warehouse statement-execution payload.
//!
//! The payload carries a column manifest and a `data_array` of string cells;
//! cells are converted to typed values by each column's SQL type name.

use serde::Deserialize;
use tracing::debug;

use super::cell::{parse_cell, sql_type_to_kind};
use super::{ColumnMeta, RowIterator};
use crate::error::RowsetError;
use crate::record::Record;
use crate::value::Value;

#[derive(Deserialize)]
struct StatementResponse {
    statement_id: Option<String>,
    status: StatementStatus,
    manifest: Option<Manifest>,
    result: Option<ResultData>,
}

#[derive(Deserialize)]
struct StatementStatus {
    state: String,
    error: Option<StatementError>,
}

#[derive(Deserialize)]
struct StatementError {
    error_code: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct Manifest {
    schema: Option<SchemaInfo>,
}

#[derive(Deserialize)]
struct SchemaInfo {
    columns: Option<Vec<ColumnInfo>>,
}

#[derive(Deserialize)]
struct ColumnInfo {
    name: String,
    type_name: Option<String>,
}

#[derive(Deserialize)]
struct ResultData {
    data_array: Option<Vec<Vec<Option<String>>>>,
}

impl RowIterator {
    /// Parse a statement payload into a schema plus typed, keyed rows.
    ///
    /// Only a `SUCCEEDED` statement yields rows; any other state fails with
    /// `Source`, carrying the statement's error message when present.
    pub fn from_statement_json(payload: &str) -> Result<Self, RowsetError> {
        let response: StatementResponse =
            serde_json::from_str(payload).map_err(|e| RowsetError::Source {
                message: format!("failed to parse statement payload: {e}"),
            })?;

        match response.status.state.as_str() {
            "SUCCEEDED" => Self::from_response(response),
            "FAILED" => {
                let error = response.status.error;
                let code = error.as_ref().and_then(|e| e.error_code.clone());
                let msg = error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "unknown error".to_string());
                Err(RowsetError::Source {
                    message: match code {
                        Some(code) => format!("statement failed [{code}]: {msg}"),
                        None => format!("statement failed: {msg}"),
                    },
                })
            }
            other => Err(RowsetError::Source {
                message: format!(
                    "statement {} is {other}, expected SUCCEEDED",
                    response.statement_id.as_deref().unwrap_or("<unknown>")
                ),
            }),
        }
    }

    fn from_response(response: StatementResponse) -> Result<Self, RowsetError> {
        let schema: Vec<ColumnMeta> = response
            .manifest
            .and_then(|m| m.schema)
            .and_then(|s| s.columns)
            .unwrap_or_default()
            .into_iter()
            .map(|c| ColumnMeta {
                name: c.name,
                type_name: c.type_name.unwrap_or_else(|| "STRING".to_string()),
            })
            .collect();

        let kinds: Vec<_> = schema.iter().map(|c| sql_type_to_kind(&c.type_name)).collect();

        let rows = response
            .result
            .and_then(|r| r.data_array)
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, cells)| {
                if cells.len() != schema.len() {
                    return Err(RowsetError::ShapeMismatch {
                        message: format!(
                            "row {i} has {} cells, manifest declares {} columns",
                            cells.len(),
                            schema.len()
                        ),
                    });
                }
                Ok(schema
                    .iter()
                    .zip(&kinds)
                    .zip(cells)
                    .map(|((col, kind), cell)| {
                        let value = match cell {
                            Some(text) => parse_cell(&text, *kind),
                            None => Value::Null,
                        };
                        (col.name.clone(), value)
                    })
                    .collect::<Record>())
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(columns = schema.len(), rows = rows.len(), "decoded statement payload");
        Ok(Self { schema, rows })
    }
}
