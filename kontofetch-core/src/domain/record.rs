//! Polymorphic record values handed back by the protocol layer
//!
//! Gateways return three shapes of record: structured records with named
//! positional fields (SEPA accounts), attribute-bearing objects (MT940
//! balances and transactions), and plain mappings. `RawRecord` resolves the
//! shape once at ingestion; everything downstream works on `Record`.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::result::{Error, Result};

/// Calendar date as carried inside MT940 statement fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwiftDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SwiftDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// A single field value inside a bank record
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Bool(bool),
    /// Monetary amount, exact decimal
    Amount(Decimal),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// MT940 statement date (year/month/day, no timezone)
    SwiftDate(SwiftDate),
    List(Vec<Value>),
    Record(Record),
    /// Opaque protocol payload with no conversion rule
    Raw(Vec<u8>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Amount(_) => "amount",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::SwiftDate(_) => "swift-date",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Raw(_) => "raw",
        }
    }
}

/// An ordered key/value record as produced by the protocol layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, keeping source order
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    /// Replace the value for `key`, or append if absent
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The three record shapes a gateway may hand back, resolved exactly once
#[derive(Debug, Clone)]
pub enum RawRecord {
    /// Named positional fields (e.g. a SEPA account)
    Structured {
        fields: Vec<String>,
        values: Vec<Value>,
    },
    /// Attribute-bearing object (e.g. an MT940 transaction's data)
    Keyed(Vec<(String, Value)>),
    /// Plain mapping
    Map(BTreeMap<String, Value>),
}

impl RawRecord {
    /// Normalize into a flat key/value `Record`
    pub fn normalize(self) -> Result<Record> {
        match self {
            RawRecord::Structured { fields, values } => {
                if fields.len() != values.len() {
                    return Err(Error::protocol(format!(
                        "structured record has {} fields but {} values",
                        fields.len(),
                        values.len()
                    )));
                }
                Ok(fields.into_iter().zip(values).collect())
            }
            RawRecord::Keyed(entries) => Ok(entries.into_iter().collect()),
            RawRecord::Map(map) => Ok(map.into_iter().collect()),
        }
    }
}
