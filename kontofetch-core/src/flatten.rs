//! Record flattener
//!
//! Converts nested bank records into single-level mappings of JSON scalars.
//! Nested paths are joined with an internal `|` delimiter first and only
//! rewritten to `_` at the end, so a legitimate underscore in a source key
//! cannot corrupt a multi-level path while the walk is in progress. Both the
//! delimiter-joined insert and the final rewrite reject duplicate keys: two
//! distinct paths that would land on the same flat key are an error, never a
//! silent overwrite.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{Record, Value};

/// Internal path delimiter, rewritten to `_` once the walk is complete
const PATH_DELIMITER: char = '|';

/// A JSON-scalar leaf value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Text(s) => f.write_str(s),
            // Debug formatting keeps the decimal point on integral floats
            // ("18750.0", not "18750"), matching the JSON rendering that
            // fingerprint consumers compare against.
            FlatValue::Float(v) => write!(f, "{:?}", v),
            FlatValue::Int(v) => write!(f, "{}", v),
            FlatValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

/// A flattened record: sorted flat keys to JSON scalars
pub type FlatRecord = BTreeMap<String, FlatValue>;

/// Flatten a record into a single-level JSON-scalar mapping.
///
/// Fails on the first field with no conversion rule; no partial output
/// survives an error.
pub fn flatten(record: &Record) -> Result<FlatRecord> {
    let mut staged = BTreeMap::new();
    walk(record, None, &mut staged)?;

    let mut out = BTreeMap::new();
    for (path, value) in staged {
        let key = path.replace(PATH_DELIMITER, "_");
        if out.insert(key.clone(), value).is_some() {
            return Err(Error::KeyCollision(key));
        }
    }
    Ok(out)
}

fn walk(record: &Record, prefix: Option<&str>, out: &mut BTreeMap<String, FlatValue>) -> Result<()> {
    for (key, value) in record.entries() {
        let path = match prefix {
            Some(p) => format!("{p}{PATH_DELIMITER}{key}"),
            None => key.clone(),
        };
        match convert(value, &path)? {
            Converted::Scalar(flat) => {
                if out.insert(path.clone(), flat).is_some() {
                    return Err(Error::KeyCollision(path));
                }
            }
            Converted::Skip => {}
            Converted::Nested(sub) => walk(sub, Some(&path), out)?,
        }
    }
    Ok(())
}

enum Converted<'a> {
    Scalar(FlatValue),
    Skip,
    Nested(&'a Record),
}

/// Conversion dispatch, one arm per value kind.
///
/// Adding a `Value` variant forces a decision here; kinds without a rule
/// (non-empty lists, raw payloads) abort the whole record.
fn convert<'a>(value: &'a Value, path: &str) -> Result<Converted<'a>> {
    let converted = match value {
        Value::Text(s) => Converted::Scalar(FlatValue::Text(s.clone())),
        Value::Int(v) => Converted::Scalar(FlatValue::Int(*v)),
        Value::Bool(v) => Converted::Scalar(FlatValue::Bool(*v)),
        Value::Amount(d) => {
            let v = d.to_f64().ok_or_else(|| Error::UnsupportedType {
                field: path.to_string(),
                kind: "amount",
            })?;
            Converted::Scalar(FlatValue::Float(v))
        }
        Value::Date(d) => Converted::Scalar(FlatValue::Text(d.format("%Y-%m-%d").to_string())),
        Value::DateTime(dt) => {
            Converted::Scalar(FlatValue::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()))
        }
        Value::SwiftDate(sd) => Converted::Scalar(FlatValue::Text(format!(
            "{:04}-{:02}-{:02}",
            sd.year, sd.month, sd.day
        ))),
        Value::Null => Converted::Skip,
        Value::List(items) if items.is_empty() => Converted::Skip,
        Value::Record(rec) if rec.is_empty() => Converted::Skip,
        Value::Record(rec) => Converted::Nested(rec),
        Value::List(_) | Value::Raw(_) => {
            return Err(Error::UnsupportedType {
                field: path.to_string(),
                kind: value.kind(),
            })
        }
    };
    Ok(converted)
}
