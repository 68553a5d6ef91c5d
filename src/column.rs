use std::fmt;
use std::sync::Arc;

use crate::error::RowsetError;
use crate::key::{Key, Slice, resolve_index};
use crate::row::write_tuple;
use crate::value::Value;

/// Placeholder spliced into an `IN (...)` list when every value was null,
/// so the generated clause stays valid and matches nothing.
pub const EMPTY_RESULT_SENTINEL: &str = "__xxx__EMPTYRESULT__xxx__";

/// Read-only view over one column's values across a set of rows.
#[derive(Debug, Clone)]
pub struct ResultColumn {
    key: String,
    values: Arc<[Value]>,
}

/// What a column lookup produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSelection {
    /// Every value, looked up by the column's own name.
    Values(Vec<Value>),
    /// One value, looked up by position.
    Value(Value),
    /// A sub-range, looked up by slice.
    Column(ResultColumn),
}

impl ResultColumn {
    pub fn new<V: Into<Value>>(
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get(&self, key: impl Into<Key>) -> Result<ColumnSelection, RowsetError> {
        match key.into() {
            Key::Name(name) => self.values_for(&name).map(ColumnSelection::Values),
            Key::Index(index) => self.at(index).cloned().map(ColumnSelection::Value),
            Key::Slice(slice) => self.slice(slice).map(ColumnSelection::Column),
        }
    }

    /// An owned copy of all values; `name` must be this column's name.
    pub fn values_for(&self, name: &str) -> Result<Vec<Value>, RowsetError> {
        if name != self.key {
            return Err(RowsetError::KeyNotFound {
                key: name.to_string(),
            });
        }
        Ok(self.values.to_vec())
    }

    pub fn at(&self, index: isize) -> Result<&Value, RowsetError> {
        let pos = resolve_index(index, self.values.len())?;
        Ok(&self.values[pos])
    }

    /// New view over the selected values, under the same name.
    pub fn slice(&self, slice: impl Into<Slice>) -> Result<ResultColumn, RowsetError> {
        let values = slice
            .into()
            .indices(self.values.len())?
            .into_iter()
            .map(|i| self.values[i].clone())
            .collect();
        Ok(Self {
            key: self.key.clone(),
            values,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn keys(&self) -> [&str; 1] {
        [&self.key]
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The single `(column, values)` pair.
    pub fn items(&self) -> impl Iterator<Item = (&str, &[Value])> {
        std::iter::once((self.key.as_str(), &self.values[..]))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the values as a parenthesized SQL literal list for an
    /// `IN (...)` clause. Nulls are dropped; when nothing remains the list
    /// holds only [`EMPTY_RESULT_SENTINEL`].
    pub fn as_literal_list(&self) -> String {
        let literals: Vec<String> = self
            .values
            .iter()
            .filter(|v| !v.is_null())
            .map(sql_literal)
            .collect();

        if literals.is_empty() {
            return format!("({})", quote(EMPTY_RESULT_SENTINEL));
        }
        format!("({})", literals.join(", "))
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Float(f) if f.is_nan() => quote("NaN"),
        Value::Float(f) if f.is_infinite() => {
            quote(if *f > 0.0 { "Infinity" } else { "-Infinity" })
        }
        Value::Int(_) | Value::Float(_) | Value::Decimal(_) => value.to_string(),
        Value::Text(s) => quote(s),
        Value::Date(_) | Value::DateTime(_) | Value::Time(_) => quote(&value.to_string()),
        Value::Bytes(b) => {
            let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
            format!("X'{hex}'")
        }
    }
}

impl PartialEq for ResultColumn {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tuple(f, self.values.iter())
    }
}

impl<'a> IntoIterator for &'a ResultColumn {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
