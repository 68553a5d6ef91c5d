//! JSON encoding of result values.
//!
//! Dates and datetimes become ISO 8601 strings, decimals become JSON floats.
//! Values with no JSON form fail with `UnsupportedType` instead of being
//! stringified.

use serde_json::{Map, Number};

use crate::error::RowsetError;
use crate::record::Record;
use crate::value::{Value, iso_datetime};

/// Encode one value as a JSON primitive.
pub fn encode_value(value: &Value) -> Result<serde_json::Value, RowsetError> {
    let json = match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number(Number::from(*i)),
        Value::Float(f) => float_number(*f, value)?,
        Value::Decimal(d) => float_number(d.to_f64(), value)?,
        Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
        Value::DateTime(dt) => serde_json::Value::String(iso_datetime(dt)),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Time(_) | Value::Bytes(_) => {
            return Err(RowsetError::UnsupportedType {
                type_name: value.type_name().to_string(),
            });
        }
    };
    Ok(json)
}

fn float_number(f: f64, original: &Value) -> Result<serde_json::Value, RowsetError> {
    Number::from_f64(f)
        .map(serde_json::Value::Number)
        .ok_or_else(|| RowsetError::UnsupportedType {
            type_name: format!("non-finite {} ({f})", original.type_name()),
        })
}

/// Encode a record as a JSON object, preserving field order.
pub fn encode_record(record: &Record) -> Result<serde_json::Value, RowsetError> {
    let mut map = Map::with_capacity(record.len());
    for (key, value) in record.iter() {
        map.insert(key.to_string(), encode_value(value)?);
    }
    Ok(serde_json::Value::Object(map))
}

/// Encode a sequence of records as a JSON array of objects.
pub fn encode_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<serde_json::Value, RowsetError> {
    let array = records
        .into_iter()
        .map(encode_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::Value::Array(array))
}

/// Serialize records to a compact JSON string.
pub fn to_json_string<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<String, RowsetError> {
    let value = encode_records(records)?;
    serde_json::to_string(&value).map_err(|e| RowsetError::Format {
        message: format!("failed to serialize JSON: {e}"),
    })
}

/// Decode a JSON scalar into a value. Arrays and objects have no scalar
/// form and fail with `UnsupportedType`.
pub fn decode_value(json: &serde_json::Value) -> Result<Value, RowsetError> {
    let value = match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Array(_) => {
            return Err(RowsetError::UnsupportedType {
                type_name: "JSON array".to_string(),
            });
        }
        serde_json::Value::Object(_) => {
            return Err(RowsetError::UnsupportedType {
                type_name: "JSON object".to_string(),
            });
        }
    };
    Ok(value)
}
