use serde_json::{Map, Value};

/// A single source field, classified by shape
///
/// JSON `null` and a missing key both read as [`RawValue::Absent`]. Numbers
/// that fit in an `i64` are [`RawValue::Integer`]; every other number is a
/// [`RawValue::Float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    /// Field missing or null
    Absent,

    /// A JSON string
    Text(&'a str),

    /// An integral JSON number
    Integer(i64),

    /// A non-integral (or out of range) JSON number
    Float(f64),

    /// A JSON boolean
    Boolean(bool),

    /// A nested JSON object
    Object(&'a Map<String, Value>),

    /// A JSON array
    List(&'a [Value]),
}

impl<'a> RawValue<'a> {
    /// Returns true if the field carries no usable content
    ///
    /// Absent fields, whitespace-only strings, empty lists and empty objects
    /// are blank. Numbers and booleans never are.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Object(map) => map.is_empty(),
            Self::Integer(_) | Self::Float(_) | Self::Boolean(_) => false,
        }
    }

    /// Returns the string content if this is a text value
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the named member of an object value
    ///
    /// Any other shape yields [`RawValue::Absent`].
    pub fn member(&self, key: &str) -> RawValue<'a> {
        match *self {
            Self::Object(map) => map.get(key).map(RawValue::from).unwrap_or(RawValue::Absent),
            _ => RawValue::Absent,
        }
    }
}

impl<'a> From<&'a Value> for RawValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(b) => Self::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Absent),
            },
            Value::String(s) => Self::Text(s.as_str()),
            Value::Array(items) => Self::List(items.as_slice()),
            Value::Object(map) => Self::Object(map),
        }
    }
}
