//! Cell values and rows.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::DataType;

/// A row of a table: a mapping from column name to value. Every declared
/// column of a stored row is present, with [Value::Null] for unset cells.
pub type Row = HashMap<String, Value>;

/// A single cell value.
///
/// There is no coercion between the numeric kinds: `Int(1)` and
/// `Float(1.0)` are distinct values that compare unequal. The untagged
/// serde representation gives the snapshot encoding directly: numbers
/// unquoted, strings quoted, NULL as the document's null. `Int` is listed
/// before `Float` so integral numbers decode back as integers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Returns `true` if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The runtime type of this value, or `None` for NULL. A standalone
    /// NULL is untyped until placed in a column.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Int(_) => Some(DataType::Int),
            Value::Float(_) => Some(DataType::Float),
            Value::Str(_) => Some(DataType::Str),
        }
    }

    /// Checks this value against a declared column type. NULL passes here;
    /// whether a column accepts NULL is the constraint checker's concern.
    pub fn matches_type(&self, data_type: DataType) -> bool {
        match self.data_type() {
            None => true,
            Some(t) => t == data_type,
        }
    }

    /// Orders two like-typed values. Unlike types, and NULL on either side,
    /// have no defined order and yield `None`; the comparison predicates
    /// treat that as "no match".
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

// Values key the index maps, which needs Eq + Hash. f64 is only PartialEq
// (NaN != NaN), but a NaN never reaches an index: it can't be written as a
// SQL literal, and equality lookups on one would find nothing anyway.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int(i) => i.hash(state),
            // 0.0 and -0.0 compare equal, so they must hash alike.
            Value::Float(f) => (if *f == 0.0 { 0.0f64 } else { *f }).to_bits().hash(state),
            Value::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}
