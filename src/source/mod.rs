//! Adapters that normalize source-specific query output into a
//! [`BaseResult`].
//!
//! Every adapter ends the same way: an ordered key list plus records that
//! carry exactly those keys. A record that disagrees with the established
//! key list fails with `ShapeMismatch` before any result is built.

pub mod cell;
pub mod file;
pub mod warehouse;

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::error::RowsetError;
use crate::record::Record;
use crate::result::BaseResult;
use crate::value::Value;

/// Metadata for a single result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub type_name: String,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Output of a relational driver: column descriptions plus positional rows.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Vec<Value>>,
}

/// Output of an analytic warehouse: a schema plus keyed rows.
#[derive(Debug, Clone, Default)]
pub struct RowIterator {
    pub schema: Vec<ColumnMeta>,
    pub rows: Vec<Record>,
}

/// The query outputs a [`QueryResult`] knows how to normalize.
#[derive(Debug, Clone)]
pub enum QuerySource {
    Cursor(Cursor),
    RowIterator(RowIterator),
}

impl From<Cursor> for QuerySource {
    fn from(c: Cursor) -> Self {
        QuerySource::Cursor(c)
    }
}

impl From<RowIterator> for QuerySource {
    fn from(r: RowIterator) -> Self {
        QuerySource::RowIterator(r)
    }
}

/// Check every record against the first record's key set and rewrite it
/// in the order of `keys`.
fn normalize_records(keys: &[String], rows: Vec<Record>) -> Result<Vec<Record>, RowsetError> {
    let Some(first) = rows.first() else {
        return Ok(rows);
    };
    let reference = first.clone();

    rows.into_iter()
        .enumerate()
        .map(|(i, record)| {
            if !record.same_keys(&reference) {
                return Err(RowsetError::ShapeMismatch {
                    message: format!(
                        "row {i} has columns {:?}, expected {:?}",
                        record.keys().collect::<Vec<_>>(),
                        reference.keys().collect::<Vec<_>>()
                    ),
                });
            }
            Ok(record.reordered(keys))
        })
        .collect()
}

/// Rows of a database query, normalized from a driver-specific source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult(BaseResult);

impl QueryResult {
    pub fn from_source(source: impl Into<QuerySource>) -> Result<Self, RowsetError> {
        let (keys, rows) = match source.into() {
            QuerySource::Cursor(cursor) => {
                let keys: Vec<String> = cursor.columns.into_iter().map(|c| c.name).collect();
                let rows = cursor
                    .rows
                    .into_iter()
                    .enumerate()
                    .map(|(i, values)| {
                        if values.len() != keys.len() {
                            return Err(RowsetError::ShapeMismatch {
                                message: format!(
                                    "row {i} has {} values, expected {}",
                                    values.len(),
                                    keys.len()
                                ),
                            });
                        }
                        Ok(Record::from_values(&keys, values))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (keys, rows)
            }
            QuerySource::RowIterator(iter) => {
                let mut keys: Vec<String> = iter.schema.into_iter().map(|c| c.name).collect();
                if keys.is_empty()
                    && let Some(first) = iter.rows.first()
                {
                    keys = first.keys().map(str::to_string).collect();
                }
                if let Some(first) = iter.rows.first()
                    && !(first.len() == keys.len() && keys.iter().all(|k| first.contains_key(k)))
                {
                    return Err(RowsetError::ShapeMismatch {
                        message: format!(
                            "rows have columns {:?}, schema declares {keys:?}",
                            first.keys().collect::<Vec<_>>()
                        ),
                    });
                }
                let rows = normalize_records(&keys, iter.rows)?;
                (keys, rows)
            }
        };

        debug!(columns = keys.len(), rows = rows.len(), "normalized query result");
        BaseResult::new(keys, rows).map(Self)
    }

    pub fn into_inner(self) -> BaseResult {
        self.0
    }
}

impl Deref for QueryResult {
    type Target = BaseResult;

    fn deref(&self) -> &BaseResult {
        &self.0
    }
}

impl DerefMut for QueryResult {
    fn deref_mut(&mut self) -> &mut BaseResult {
        &mut self.0
    }
}

/// Rows read from a flat file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileResult(BaseResult);

impl FileResult {
    /// Build from keyed records; the first record fixes the key list.
    pub fn from_records(rows: Vec<Record>) -> Result<Self, RowsetError> {
        let keys: Vec<String> = rows
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default();
        let rows = normalize_records(&keys, rows)?;
        Self::from_parts(keys, rows)
    }

    /// Build from a header and positional rows, as a CSV reader yields them.
    pub fn from_rows(keys: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, RowsetError> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, values)| {
                if values.len() != keys.len() {
                    return Err(RowsetError::ShapeMismatch {
                        message: format!(
                            "record {i} has {} fields, header has {}",
                            values.len(),
                            keys.len()
                        ),
                    });
                }
                Ok(Record::from_values(&keys, values))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parts(keys, records)
    }

    fn from_parts(keys: Vec<String>, rows: Vec<Record>) -> Result<Self, RowsetError> {
        debug!(columns = keys.len(), rows = rows.len(), "normalized file result");
        BaseResult::new(keys, rows).map(Self)
    }

    pub fn into_inner(self) -> BaseResult {
        self.0
    }
}

impl Deref for FileResult {
    type Target = BaseResult;

    fn deref(&self) -> &BaseResult {
        &self.0
    }
}

impl DerefMut for FileResult {
    fn deref_mut(&mut self) -> &mut BaseResult {
        &mut self.0
    }
}
