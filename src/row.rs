use std::fmt;
use std::sync::Arc;

use crate::error::RowsetError;
use crate::key::{Key, resolve_index};
use crate::record::Record;
use crate::value::Value;

/// Read-only view over one record and the key list it belongs to.
///
/// The key list is shared with the result that produced the row, so
/// handing rows out is two reference-count bumps. Two rows are equal when
/// their records are equal, whatever their key lists.
#[derive(Debug, Clone)]
pub struct ResultRow {
    keys: Arc<[String]>,
    record: Arc<Record>,
}

impl ResultRow {
    pub fn new(keys: impl Into<Arc<[String]>>, record: Record) -> Self {
        Self {
            keys: keys.into(),
            record: Arc::new(record),
        }
    }

    pub(crate) fn from_shared(keys: Arc<[String]>, record: Arc<Record>) -> Self {
        Self { keys, record }
    }

    /// Build a row from positional values.
    pub fn from_values<V: Into<Value>>(
        keys: impl Into<Arc<[String]>>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let keys = keys.into();
        let record = Record::from_values(&keys[..], values);
        Self::from_shared(keys, Arc::new(record))
    }

    /// Look up a value by column name or position.
    pub fn get(&self, key: impl Into<Key>) -> Result<&Value, RowsetError> {
        match key.into() {
            Key::Name(name) => self.value(&name),
            Key::Index(index) => self.at(index),
            other @ Key::Slice(_) => Err(RowsetError::InvalidKeyType {
                message: format!("rows are looked up by name or index, not {}", other.kind()),
            }),
        }
    }

    /// Value of the named column.
    pub fn value(&self, name: &str) -> Result<&Value, RowsetError> {
        if !self.keys.iter().any(|k| k == name) {
            return Err(RowsetError::KeyNotFound {
                key: name.to_string(),
            });
        }
        self.record.get(name).ok_or_else(|| RowsetError::KeyNotFound {
            key: name.to_string(),
        })
    }

    /// Value at a key-list position; negative positions count from the end.
    pub fn at(&self, index: isize) -> Result<&Value, RowsetError> {
        let pos = resolve_index(index, self.keys.len())?;
        self.value(&self.keys[pos])
    }

    /// Value of the named column, or `default` when the lookup fails.
    pub fn get_or_default(&self, name: &str, default: Value) -> Value {
        self.value(name).cloned().unwrap_or(default)
    }

    /// Values in key-list order.
    pub fn values(&self) -> Vec<Value> {
        self.record.values_in(&self.keys[..]).cloned().collect()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn columns(&self) -> &[String] {
        self.keys()
    }

    pub(crate) fn shared_keys(&self) -> &Arc<[String]> {
        &self.keys
    }

    pub(crate) fn shared_record(&self) -> &Arc<Record> {
        &self.record
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// `(column, value)` pairs in record order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.record.iter()
    }

    pub fn len(&self) -> usize {
        self.record.len()
    }

    /// True when the record has no columns.
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }
}

impl PartialEq for ResultRow {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.record, &other.record) || self.record == other.record
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, self.record.values_in(&self.keys[..]))
    }
}

impl<'a> IntoIterator for &'a ResultRow {
    type Item = (&'a str, &'a Value);
    type IntoIter = Items<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Items {
            record: &self.record,
            pos: 0,
        }
    }
}

/// Iterator over a row's `(column, value)` pairs.
pub struct Items<'a> {
    record: &'a Record,
    pos: usize,
}

impl<'a> Iterator for Items<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.record.get_index(self.pos)?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.record.len().saturating_sub(self.pos);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Items<'_> {}

/// Render values as a tuple: `(1, 'x', NULL)`; a single value keeps the
/// parentheses without a trailing comma.
pub(crate) fn write_tuple<'a>(
    f: &mut fmt::Formatter<'_>,
    values: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&value.repr())?;
    }
    f.write_str(")")
}
