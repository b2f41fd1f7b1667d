use std::fmt;

/// A single cell of a [`crate::Table`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    UInt64(u64),
    UInt32(u32),
    Int64(i64),
    Int32(i32),
    Float64(f64),
    Float32(f32),
    Text(String),
}

/// Kind of a [`Value`], used to pick the column type of a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    UInt64,
    UInt32,
    Int64,
    Int32,
    Float64,
    Float32,
    Text,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Kind of the value, `None` for [`Value::Null`].
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => ValueKind::Bool,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::Int64(_) => ValueKind::Int64,
            Value::Int32(_) => ValueKind::Int32,
            Value::Float64(_) => ValueKind::Float64,
            Value::Float32(_) => ValueKind::Float32,
            Value::Text(_) => ValueKind::Text,
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::UInt64(v) => Some(v),
            Value::UInt32(v) => Some(v as u64),
            Value::Int64(v) => u64::try_from(v).ok(),
            Value::Int32(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float64(v) => Some(v),
            Value::Float32(v) => Some(v as f64),
            Value::UInt64(v) => Some(v as f64),
            Value::UInt32(v) => Some(v as f64),
            Value::Int64(v) => Some(v as f64),
            Value::Int32(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Key used to match rows in joins. Integers of different widths with the same value
    /// share a key, text keys are compared case-insensitively and nulls never match.
    /// Keys are tagged with their kind, so text never matches a number.
    pub(crate) fn join_key(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(text) => Some(format!("t:{}", text.to_lowercase())),
            Value::UInt64(_) | Value::UInt32(_) | Value::Int64(_) | Value::Int32(_) => {
                Some(format!("i:{}", self))
            }
            other => Some(format!("o:{:?}", other)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt64(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
