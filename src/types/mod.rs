//! Value, record and table types shared by the join engine

mod record;
mod table;
mod timestamp;

pub use record::Record;
pub use table::Table;
pub(crate) use table::is_valid_name;
pub use timestamp::Timestamp;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Unified cell value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// Integer value
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// Boolean value
    Bool(bool),

    /// Text string
    Text(String),

    /// Calendar date
    Date(NaiveDate),

    /// Instant in time (UTC)
    Timestamp(Timestamp),

    /// Nested list of values
    List(Vec<Value>),

    /// Null value
    Null,
}

impl Value {
    /// True only for `Null`.
    ///
    /// Empty text, zero and `false` are real values and are never replaced
    /// by defaults.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }
}

/// Missing-value predicate used wherever a column may not exist at all
pub fn is_absent(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_absent)
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            obj @ serde_json::Value::Object(_) => Value::Text(obj.to_string()),
        }
    }
}

/// A positional row aligned to a table's headers
pub type Row = Vec<Value>;

/// Positional 2-D output of a join
pub type Matrix = Vec<Row>;
