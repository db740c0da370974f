use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared type of a column.
///
/// Serialized as an integer code (0, 1, 2) in the snapshot document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum DataType {
    Int,
    Str,
    Float,
}

impl From<DataType> for u8 {
    fn from(data_type: DataType) -> u8 {
        match data_type {
            DataType::Int => 0,
            DataType::Str => 1,
            DataType::Float => 2,
        }
    }
}

impl TryFrom<u8> for DataType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DataType::Int),
            1 => Ok(DataType::Str),
            2 => Ok(DataType::Float),
            code => Err(format!("unknown data type code {code}")),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "INT"),
            DataType::Str => write!(f, "STRING"),
            DataType::Float => write!(f, "FLOAT"),
        }
    }
}
