use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<u8> for FieldValue {
    fn from(value: u8) -> Self {
        Self::Integer(value.into())
    }
}

/// One timestamped, tagged row bound for the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
    pub timestamp: DateTime<Utc>,
}

impl Point {
    pub fn new(measurement: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Encodes the point as a single line of InfluxDB line protocol with a
    /// nanosecond timestamp.
    ///
    /// Non-finite floats are left out since the protocol has no spelling for
    /// them. A point left with no fields is an error.
    pub fn to_line_protocol(&self) -> Result<String, StoreError> {
        let mut line = String::with_capacity(256);
        push_escaped(&mut line, &self.measurement, &[',', ' ']);
        for (key, value) in &self.tags {
            line.push(',');
            push_escaped(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            push_escaped(&mut line, value, &[',', '=', ' ']);
        }

        let mut separator = ' ';
        for (key, value) in &self.fields {
            if let FieldValue::Float(f) = value {
                if !f.is_finite() {
                    tracing::warn!(field = %key, value = %f, "Dropping non-finite field");
                    continue;
                }
            }
            line.push(separator);
            separator = ',';
            push_escaped(&mut line, key, &[',', '=', ' ']);
            line.push('=');
            // Writing into a String cannot fail.
            let _ = match value {
                FieldValue::Float(f) => write!(line, "{f:?}"),
                FieldValue::Integer(i) => write!(line, "{i}i"),
            };
        }
        if separator == ' ' {
            return Err(StoreError::Encode(format!(
                "point '{}' has no encodable fields",
                self.measurement
            )));
        }

        let nanos = self.timestamp.timestamp_nanos_opt().ok_or_else(|| {
            StoreError::Encode(format!("timestamp {} out of range", self.timestamp))
        })?;
        let _ = write!(line, " {nanos}");
        Ok(line)
    }
}

fn push_escaped(out: &mut String, raw: &str, special: &[char]) {
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}
