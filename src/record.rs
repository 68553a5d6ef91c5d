use indexmap::IndexMap;

use crate::value::Value;

/// One result row: column name → value, in column order.
///
/// Equality is order-sensitive, like comparing two rows field by field.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Pair `keys` with positional `values`. Extra entries on either side
    /// are dropped; callers that care about arity check it first.
    pub fn from_values<K, V>(keys: &[K], values: impl IntoIterator<Item = V>) -> Self
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        keys.iter()
            .zip(values)
            .map(|(k, v)| (k.as_ref().to_string(), v.into()))
            .collect()
    }

    /// Insert or replace a field. New fields go to the end.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field at a position, in column order.
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.fields.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    /// Values in the order of `keys`, skipping keys the record lacks.
    pub fn values_in<'a, K: AsRef<str>>(
        &'a self,
        keys: &'a [K],
    ) -> impl Iterator<Item = &'a Value> + 'a {
        keys.iter().filter_map(|k| self.fields.get(k.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when both records hold the same column names, in any order.
    pub fn same_keys(&self, other: &Record) -> bool {
        self.len() == other.len() && self.keys().all(|k| other.contains_key(k))
    }

    /// Reorder fields to follow `keys`. Fields missing from `keys` are
    /// dropped; keys missing from the record are skipped.
    pub(crate) fn reordered<K: AsRef<str>>(mut self, keys: &[K]) -> Record {
        keys.iter()
            .filter_map(|k| self.fields.swap_remove_entry(k.as_ref()))
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Build a [`Record`] from `key => value` pairs.
///
/// ```
/// use rowset::record;
/// let r = record! { "a" => 1, "b" => "x" };
/// assert_eq!(r.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => { $crate::Record::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $( record.insert($key, $crate::Value::from($value)); )+
        record
    }};
}
