//! The dynamically-typed template value.

use std::fmt;

use crate::{Heap, Record};

/// Runtime value in template rendering.
///
/// Scalars are stored inline; strings, lists, and records sit behind
/// `Heap` so cloning a value is cheap everywhere in the evaluator.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(Heap<String>),
    /// List of values.
    List(Heap<Vec<Value>>),
    /// Nested record.
    Record(Heap<Record>),
}

// Factory methods (the only way to construct heap values).
impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    /// Create a float value.
    #[inline]
    pub fn float(v: f64) -> Self {
        Value::Float(v)
    }

    /// Create a boolean value.
    #[inline]
    pub fn bool(v: bool) -> Self {
        Value::Bool(v)
    }

    /// Create a string value.
    pub fn str(v: impl Into<String>) -> Self {
        Value::Str(Heap::new(v.into()))
    }

    /// Create a list value.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a record value.
    pub fn record(record: Record) -> Self {
        Value::Record(Heap::new(record))
    }
}

impl Value {
    /// Name of this value's type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Coerce to a boolean for conditional tests.
    ///
    /// Null, `false`, numeric zero, NaN, and the empty string are
    /// falsy; lists and records are always truthy, even when empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Record(_) => true,
        }
    }

    /// Coerce to output text for printing.
    ///
    /// Composite values (lists, records) have no text form and yield
    /// `None`; printing them is an evaluation error, not a silent
    /// best-effort stringification.
    pub fn render_text(&self) -> Option<String> {
        match self {
            Value::Null => Some("null".to_owned()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::Str(s) => Some(s.to_string()),
            Value::List(_) | Value::Record(_) => None,
        }
    }

    /// View as a string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// View as a list, if this is a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// View as a record, if this is a record value.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Numeric view, promoting integers to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(i) => {
                // Precision loss above 2^53 is acceptable for mixed
                // int/float arithmetic, matching the runtime renderer.
                #[allow(clippy::cast_precision_loss)]
                Some(*i as f64)
            }
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Render a float the way the runtime does: integral finite floats keep
/// one decimal place so int and float output stay distinguishable.
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => f.debug_tuple("List").field(&items.as_slice()).finish(),
            Value::Record(r) => f.debug_tuple("Record").field(&**r).finish(),
        }
    }
}
