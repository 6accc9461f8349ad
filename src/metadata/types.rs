//! Catalog row types.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime};
use duckdb::types::{TimeUnit, Value};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// A single value read from a catalog row.
///
/// Maps and structs become [`CatalogValue::Map`], lists become
/// [`CatalogValue::List`], and dates and times are rendered as ISO text.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<CatalogValue>),
    /// Entries in engine order.
    Map(Vec<(String, CatalogValue)>),
}

impl CatalogValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CatalogValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CatalogValue::Int(i) => Some(*i),
            CatalogValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CatalogValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CatalogValue::Null)
    }

    /// Entries of a map or struct value.
    pub fn as_map(&self) -> Option<&[(String, CatalogValue)]> {
        match self {
            CatalogValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<Value> for CatalogValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CatalogValue::Null,
            Value::Boolean(b) => CatalogValue::Bool(b),
            Value::TinyInt(i) => CatalogValue::Int(i.into()),
            Value::SmallInt(i) => CatalogValue::Int(i.into()),
            Value::Int(i) => CatalogValue::Int(i.into()),
            Value::BigInt(i) => CatalogValue::Int(i),
            Value::HugeInt(i) => i64::try_from(i)
                .map(CatalogValue::Int)
                .unwrap_or_else(|_| CatalogValue::Text(i.to_string())),
            Value::UTinyInt(u) => CatalogValue::UInt(u.into()),
            Value::USmallInt(u) => CatalogValue::UInt(u.into()),
            Value::UInt(u) => CatalogValue::UInt(u.into()),
            Value::UBigInt(u) => CatalogValue::UInt(u),
            Value::Float(f) => CatalogValue::Float(f.into()),
            Value::Double(f) => CatalogValue::Float(f),
            Value::Text(s) | Value::Enum(s) => CatalogValue::Text(s),
            Value::Date32(days) => date_text(days),
            Value::Timestamp(unit, value) => timestamp_text(unit, value),
            Value::Time64(unit, value) => time_text(unit, value),
            Value::List(items) => {
                CatalogValue::List(items.into_iter().map(CatalogValue::from).collect())
            }
            Value::Struct(fields) => CatalogValue::Map(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), CatalogValue::from(value.clone())))
                    .collect(),
            ),
            Value::Map(entries) => CatalogValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (map_key(key.clone()), CatalogValue::from(value.clone())))
                    .collect(),
            ),
            other => CatalogValue::Text(format!("{:?}", other)),
        }
    }
}

fn map_key(key: Value) -> String {
    match CatalogValue::from(key) {
        CatalogValue::Text(s) => s,
        other => other.to_string(),
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

fn date_text(days: i32) -> CatalogValue {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .map(|date| CatalogValue::Text(date.format("%Y-%m-%d").to_string()))
        .unwrap_or(CatalogValue::Int(days.into()))
}

fn timestamp_text(unit: TimeUnit, value: i64) -> CatalogValue {
    let micros = to_micros(unit, value);
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos)
        .map(|ts| {
            CatalogValue::Text(ts.naive_utc().format("%Y-%m-%d %H:%M:%S%.f").to_string())
        })
        .unwrap_or(CatalogValue::Int(value))
}

fn time_text(unit: TimeUnit, value: i64) -> CatalogValue {
    let micros = to_micros(unit, value);
    u32::try_from(micros.div_euclid(1_000_000))
        .ok()
        .and_then(|secs| {
            let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
            NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
        })
        .map(|time| CatalogValue::Text(time.format("%H:%M:%S%.f").to_string()))
        .unwrap_or(CatalogValue::Int(value))
}

// Scalars serialize as plain JSON values, maps as objects in engine order.
impl Serialize for CatalogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CatalogValue::Null => serializer.serialize_unit(),
            CatalogValue::Bool(b) => serializer.serialize_bool(*b),
            CatalogValue::Int(i) => serializer.serialize_i64(*i),
            CatalogValue::UInt(u) => serializer.serialize_u64(*u),
            CatalogValue::Float(f) => serializer.serialize_f64(*f),
            CatalogValue::Text(s) => serializer.serialize_str(s),
            CatalogValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CatalogValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Null => write!(f, "NULL"),
            CatalogValue::Bool(b) => write!(f, "{}", b),
            CatalogValue::Int(i) => write!(f, "{}", i),
            CatalogValue::UInt(u) => write!(f, "{}", u),
            CatalogValue::Float(x) => write!(f, "{}", x),
            CatalogValue::Text(s) => write!(f, "'{}'", s),
            CatalogValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CatalogValue::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// One row of a catalog table function, with the engine's column names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogRow {
    fields: Vec<(String, CatalogValue)>,
}

impl CatalogRow {
    pub fn new(fields: Vec<(String, CatalogValue)>) -> Self {
        Self { fields }
    }

    /// Value of a column, `None` if the engine did not report that column.
    pub fn get(&self, column: &str) -> Option<&CatalogValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Text value of a column; `None` for absent, NULL or non-text columns.
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CatalogValue::as_str)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> &[(String, CatalogValue)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Serialized as a JSON object in engine column order.
impl Serialize for CatalogRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for CatalogRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        write!(f, ")")
    }
}
