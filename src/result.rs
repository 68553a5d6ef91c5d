use std::collections::HashSet;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use indexmap::IndexMap;

use crate::codec;
use crate::column::ResultColumn;
use crate::error::RowsetError;
use crate::format_columnar;
use crate::key::{Key, Slice, resolve_index};
use crate::record::Record;
use crate::row::ResultRow;
use crate::value::Value;

/// The rows of a query result or file, sharing one ordered key list.
///
/// Rows are materialized when the result is built. Rows and columns handed
/// out by lookups are snapshots: later `append`, `extend`, `pop` or
/// `filter_in_place` calls do not change them.
#[derive(Debug, Clone)]
pub struct BaseResult {
    keys: Arc<[String]>,
    rows: Vec<Arc<Record>>,
}

/// What a result lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Column(ResultColumn),
    Row(ResultRow),
    Rows(BaseResult),
}

impl Selection {
    pub fn into_column(self) -> Option<ResultColumn> {
        match self {
            Selection::Column(c) => Some(c),
            _ => None,
        }
    }

    pub fn into_row(self) -> Option<ResultRow> {
        match self {
            Selection::Row(r) => Some(r),
            _ => None,
        }
    }

    pub fn into_rows(self) -> Option<BaseResult> {
        match self {
            Selection::Rows(r) => Some(r),
            _ => None,
        }
    }
}

/// Anything a [`BaseResult`] can be built from: one record or many.
pub trait IntoRows {
    fn into_rows(self) -> Vec<Arc<Record>>;
}

impl IntoRows for Record {
    fn into_rows(self) -> Vec<Arc<Record>> {
        vec![Arc::new(self)]
    }
}

impl IntoRows for Vec<Record> {
    fn into_rows(self) -> Vec<Arc<Record>> {
        self.into_iter().map(Arc::new).collect()
    }
}

impl IntoRows for Vec<ResultRow> {
    fn into_rows(self) -> Vec<Arc<Record>> {
        self.iter().map(|row| Arc::clone(row.shared_record())).collect()
    }
}

impl BaseResult {
    /// Build a result over `rows`, all sharing `keys`.
    ///
    /// Key names must be unique. Records are not checked against the key
    /// list here; a record missing a column fails when that column is
    /// looked up.
    pub fn new(keys: Vec<String>, rows: impl IntoRows) -> Result<Self, RowsetError> {
        let mut seen = HashSet::with_capacity(keys.len());
        if let Some(dup) = keys.iter().find(|k| !seen.insert(k.as_str())) {
            return Err(RowsetError::InvalidArgument {
                message: format!("duplicate column name {dup:?}"),
            });
        }
        Ok(Self {
            keys: keys.into(),
            rows: rows.into_rows(),
        })
    }

    /// A result with no columns and no rows.
    pub fn empty() -> Self {
        Self {
            keys: Arc::from(Vec::new()),
            rows: Vec::new(),
        }
    }

    fn from_part(keys: Arc<[String]>, rows: Vec<Arc<Record>>) -> Self {
        Self { keys, rows }
    }

    fn row_view(&self, record: &Arc<Record>) -> ResultRow {
        ResultRow::from_shared(Arc::clone(&self.keys), Arc::clone(record))
    }

    // --- Lookup ---

    /// Column by name, row by index, or a sub-result by slice.
    pub fn lookup(&self, key: impl Into<Key>) -> Result<Selection, RowsetError> {
        match key.into() {
            Key::Name(name) => self.column(&name).map(Selection::Column),
            Key::Index(index) => self.row(index).map(Selection::Row),
            Key::Slice(slice) => self.slice(slice).map(Selection::Rows),
        }
    }

    /// The named column's values across every row.
    pub fn column(&self, name: &str) -> Result<ResultColumn, RowsetError> {
        if !self.keys.iter().any(|k| k == name) {
            return Err(RowsetError::KeyNotFound {
                key: name.to_string(),
            });
        }
        let values = self
            .rows
            .iter()
            .map(|record| {
                record.get(name).cloned().ok_or_else(|| RowsetError::KeyNotFound {
                    key: name.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResultColumn::new(name, values))
    }

    /// Row at `index`; negative indices count from the end.
    pub fn row(&self, index: isize) -> Result<ResultRow, RowsetError> {
        let pos = resolve_index(index, self.rows.len())?;
        Ok(self.row_view(&self.rows[pos]))
    }

    /// New result over the sliced rows, with the same key list.
    pub fn slice(&self, slice: impl Into<Slice>) -> Result<BaseResult, RowsetError> {
        let rows = slice
            .into()
            .indices(self.rows.len())?
            .into_iter()
            .map(|i| Arc::clone(&self.rows[i]))
            .collect();
        Ok(Self::from_part(Arc::clone(&self.keys), rows))
    }

    pub fn first(&self) -> Option<ResultRow> {
        self.rows.first().map(|record| self.row_view(record))
    }

    /// The named column, or None when it cannot be looked up.
    pub fn get(&self, name: &str) -> Option<ResultColumn> {
        self.column(name).ok()
    }

    /// The named column, or `default` when it cannot be looked up.
    pub fn get_or_default(&self, name: &str, default: ResultColumn) -> ResultColumn {
        self.get(name).unwrap_or(default)
    }

    // --- Shape ---

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True only when there are neither columns nor rows. A result with
    /// columns but zero rows is not empty; see [`BaseResult::has_rows`].
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.rows.is_empty()
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.keys
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = ResultRow> + '_ {
        self.rows.iter().map(|record| self.row_view(record))
    }

    /// Every row as its values, in key-list order.
    pub fn values(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        self.rows
            .iter()
            .map(|record| record.values_in(&self.keys[..]).cloned().collect())
    }

    pub fn list(&self) -> Vec<Vec<Value>> {
        self.values().collect()
    }

    /// `(column, values)` pairs in key order.
    pub fn items(&self) -> Result<Vec<(String, Vec<Value>)>, RowsetError> {
        Ok(self.as_dict()?.into_iter().collect())
    }

    // --- Views ---

    /// Columnar layout: column name → values, in key order.
    pub fn as_dict(&self) -> Result<IndexMap<String, Vec<Value>>, RowsetError> {
        self.keys
            .iter()
            .map(|k| {
                let column = self.column(k)?;
                Ok((k.clone(), column.values().to_vec()))
            })
            .collect()
    }

    /// One record per row, with fields in key-list order.
    pub fn as_json_rows(&self) -> Result<Vec<Record>, RowsetError> {
        self.rows
            .iter()
            .map(|record| {
                self.keys
                    .iter()
                    .map(|k| {
                        let value = record.get(k).ok_or_else(|| RowsetError::KeyNotFound {
                            key: k.clone(),
                        })?;
                        Ok((k.clone(), value.clone()))
                    })
                    .collect::<Result<Record, RowsetError>>()
            })
            .collect()
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, RowsetError> {
        codec::encode_records(&self.as_json_rows()?)
    }

    pub fn as_json_string(&self) -> Result<String, RowsetError> {
        codec::to_json_string(&self.as_json_rows()?)
    }

    /// The whole result as an Arrow record batch, one column per key.
    pub fn as_dataframe(&self) -> Result<RecordBatch, RowsetError> {
        format_columnar::build_record_batch(self)
    }

    // --- Mutation ---

    /// Remove and return the last row.
    pub fn pop(&mut self) -> Result<ResultRow, RowsetError> {
        self.pop_at(-1)
    }

    /// Remove and return the row at `index`.
    pub fn pop_at(&mut self, index: isize) -> Result<ResultRow, RowsetError> {
        let pos = resolve_index(index, self.rows.len())?;
        let record = self.rows.remove(pos);
        Ok(ResultRow::from_shared(Arc::clone(&self.keys), record))
    }

    /// Append a row. An empty result adopts the row's key list; otherwise
    /// the key lists must be equal.
    pub fn append(&mut self, row: ResultRow) -> Result<(), RowsetError> {
        if self.is_empty() {
            self.keys = Arc::clone(row.shared_keys());
        } else if !same_keys(&self.keys, row.shared_keys()) {
            return Err(RowsetError::KeyMismatch {
                expected: self.keys.to_vec(),
                found: row.keys().to_vec(),
            });
        }
        self.rows.push(Arc::clone(row.shared_record()));
        Ok(())
    }

    /// Append every row of `other`. An empty result adopts `other`'s key
    /// list; an empty `other` leaves the key list alone.
    pub fn extend(&mut self, other: BaseResult) -> Result<(), RowsetError> {
        if self.is_empty() {
            self.keys = other.keys;
        } else if !other.is_empty() && !same_keys(&self.keys, &other.keys) {
            return Err(RowsetError::KeyMismatch {
                expected: self.keys.to_vec(),
                found: other.keys.to_vec(),
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// New result holding the rows for which `predicate` is true.
    pub fn filter<F>(&self, mut predicate: F) -> BaseResult
    where
        F: FnMut(&ResultRow) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|record| predicate(&self.row_view(record)))
            .cloned()
            .collect();
        Self::from_part(Arc::clone(&self.keys), rows)
    }

    /// Keep only the rows for which `predicate` is true.
    pub fn filter_in_place<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&ResultRow) -> bool,
    {
        let keys = Arc::clone(&self.keys);
        self.rows.retain(|record| {
            predicate(&ResultRow::from_shared(Arc::clone(&keys), Arc::clone(record)))
        });
    }
}

fn same_keys(a: &Arc<[String]>, b: &Arc<[String]>) -> bool {
    Arc::ptr_eq(a, b) || a[..] == b[..]
}

impl Default for BaseResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for BaseResult {
    fn eq(&self, other: &Self) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl<'a> IntoIterator for &'a BaseResult {
    type Item = ResultRow;
    type IntoIter = Box<dyn Iterator<Item = ResultRow> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
