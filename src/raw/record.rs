use crate::raw::RawValue;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One item as received from the upstream API
///
/// The record is only ever read. Lookups never fail: a missing key reads as
/// [`RawValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Wraps a JSON value, returning `None` unless it is an object
    ///
    /// # Example
    ///
    /// ```
    /// use open5e_harvest::raw::{RawRecord, RawValue};
    /// use serde_json::json;
    ///
    /// let record = RawRecord::from_json(json!({"name": "Elf", "speed": 30})).unwrap();
    /// assert_eq!(record.get("speed"), RawValue::Integer(30));
    /// assert_eq!(record.get("asi"), RawValue::Absent);
    /// ```
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Returns the named field
    pub fn get(&self, field: &str) -> RawValue<'_> {
        self.fields
            .get(field)
            .map(RawValue::from)
            .unwrap_or(RawValue::Absent)
    }

    /// Returns the number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}
