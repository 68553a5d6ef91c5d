use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::value::{Decimal, Value};

/// Value kind a SQL type name maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Int,
    Float,
    Decimal,
    Bool,
    Date,
    DateTime,
    Time,
    Bytes,
    Text,
}

/// Map a SQL type string to the value kind its cells decode into.
/// Unknown types map to Text.
pub fn sql_type_to_kind(type_name: &str) -> CellKind {
    let normalized = type_name.trim().to_uppercase();

    // Extract base type (before parenthesis) for parameterized types
    let base = match normalized.find('(') {
        Some(pos) => normalized[..pos].trim(),
        None => normalized.as_str(),
    };

    match base {
        "INT" | "INTEGER" | "SMALLINT" | "BIGINT" | "TINYINT" | "LONG" | "SHORT" | "BYTE"
        | "INT64" => CellKind::Int,
        "REAL" | "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" | "FLOAT64" => CellKind::Float,
        "DECIMAL" | "NUMERIC" | "BIGNUMERIC" => CellKind::Decimal,
        "BIT" | "BOOLEAN" | "BOOL" => CellKind::Bool,
        "DATE" => CellKind::Date,
        "DATETIME" | "DATETIME2" | "TIMESTAMP" | "TIMESTAMP_NTZ" | "SMALLDATETIME" => {
            CellKind::DateTime
        }
        "TIME" => CellKind::Time,
        "BINARY" | "VARBINARY" | "BYTES" => CellKind::Bytes,
        _ => CellKind::Text,
    }
}

/// Decode cell text as `kind`. Text that does not parse stays Text.
pub fn parse_cell(text: &str, kind: CellKind) -> Value {
    let parsed = match kind {
        CellKind::Int => text.trim().parse::<i64>().ok().map(Value::Int),
        CellKind::Float => text.trim().parse::<f64>().ok().map(Value::Float),
        CellKind::Decimal => text.parse::<Decimal>().ok().map(Value::Decimal),
        CellKind::Bool => parse_bool(text).map(Value::Bool),
        CellKind::Date => parse_date(text).map(Value::Date),
        CellKind::DateTime => parse_datetime(text).map(Value::DateTime),
        CellKind::Time => parse_time(text).map(Value::Time),
        CellKind::Bytes => hex_decode(text).map(Value::Bytes),
        CellKind::Text => None,
    };
    parsed.unwrap_or_else(|| Value::Text(text.to_string()))
}

/// Guess the most specific value for untyped text: integer, float,
/// datetime, date, then text. Text without digits is only tried as a
/// boolean, so words like "nan" or "inf" stay text.
pub fn infer_cell(text: &str) -> Value {
    let kinds: &[CellKind] = if text.bytes().any(|b| b.is_ascii_digit()) {
        &[
            CellKind::Int,
            CellKind::Float,
            CellKind::DateTime,
            CellKind::Date,
        ]
    } else {
        &[CellKind::Bool]
    };

    kinds
        .iter()
        .map(|kind| parse_cell(text, *kind))
        .find(|v| !matches!(v, Value::Text(_)))
        .unwrap_or_else(|| Value::Text(text.to_string()))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    // ISO 8601: YYYY-MM-DDThh:mm:ss[.ffffff] or YYYY-MM-DD hh:mm:ss[.ffffff]
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f").ok()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if !s.len().is_multiple_of(2) {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}
