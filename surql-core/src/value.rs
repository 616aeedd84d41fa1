//! Filter values and their literal rendering

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A value compared against a field in a filter clause.
///
/// Every value renders into statement text as a single-quoted literal through
/// [`Value::to_literal`]. The rendering is textual: `30`, `true` and `"30"` all
/// become `'30'`, `'true'` and `'30'`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// String value
    String(String),
    /// JSON value
    Json(serde_json::Value),
    /// Array of values
    Array(Vec<Value>),
}

impl Value {
    /// Render as a single-quoted literal, e.g. `'30'`
    pub fn to_literal(&self) -> String {
        format!("'{self}'")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::I32(n) => write!(f, "{n}"),
            Value::I64(n) => write!(f, "{n}"),
            Value::F32(n) => write!(f, "{n}"),
            Value::F64(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Json(serde_json::Value::String(s)) => f.write_str(s),
            Value::Json(json) => write!(f, "{json}"),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

// Implement From for common types
impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::I32(val)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::I64(val)
    }
}

impl From<u32> for Value {
    fn from(val: u32) -> Self {
        Value::I64(i64::from(val))
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Value::F32(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::F64(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<&String> for Value {
    fn from(val: &String) -> Self {
        Value::String(val.clone())
    }
}

impl From<serde_json::Value> for Value {
    fn from(val: serde_json::Value) -> Self {
        Value::Json(val)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(vals: Vec<T>) -> Self {
        Value::Array(vals.into_iter().map(|v| v.into()).collect())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(feature = "uuid-support")]
impl From<uuid::Uuid> for Value {
    fn from(val: uuid::Uuid) -> Self {
        Value::String(val.to_string())
    }
}

#[cfg(feature = "datetime-support")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(val: chrono::DateTime<chrono::Utc>) -> Self {
        Value::String(val.to_rfc3339())
    }
}

#[cfg(feature = "datetime-support")]
impl From<chrono::NaiveDate> for Value {
    fn from(val: chrono::NaiveDate) -> Self {
        Value::String(val.to_string())
    }
}

#[cfg(feature = "decimal-support")]
impl From<rust_decimal::Decimal> for Value {
    fn from(val: rust_decimal::Decimal) -> Self {
        Value::String(val.to_string())
    }
}
