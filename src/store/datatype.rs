use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::record::Record;

/// A single bin value. Untagged so that plain TOML/JSON scalars and tables
/// map straight onto the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataType {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    List(Vec<DataType>),
    Map(Record),
    // Never produced by deserialization: byte arrays arrive as `List`.
    Bytes(Bytes),
}

impl DataType {
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Null => "null",
            DataType::Boolean(_) => "boolean",
            DataType::Integer(_) => "integer",
            DataType::Double(_) => "double",
            DataType::String(_) => "string",
            DataType::List(_) => "list",
            DataType::Map(_) => "map",
            DataType::Bytes(_) => "bytes",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataType::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DataType::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Record> {
        match self {
            DataType::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<String> for DataType {
    fn from(s: String) -> Self {
        DataType::String(s)
    }
}

impl From<&str> for DataType {
    fn from(s: &str) -> Self {
        DataType::String(s.to_string())
    }
}

impl From<i64> for DataType {
    fn from(i: i64) -> Self {
        DataType::Integer(i)
    }
}

impl From<i32> for DataType {
    fn from(i: i32) -> Self {
        DataType::Integer(i64::from(i))
    }
}

impl From<f64> for DataType {
    fn from(f: f64) -> Self {
        DataType::Double(f)
    }
}

impl From<bool> for DataType {
    fn from(b: bool) -> Self {
        DataType::Boolean(b)
    }
}

impl From<Bytes> for DataType {
    fn from(b: Bytes) -> Self {
        DataType::Bytes(b)
    }
}

impl From<Vec<u8>> for DataType {
    fn from(b: Vec<u8>) -> Self {
        DataType::Bytes(Bytes::from(b))
    }
}

impl From<Vec<DataType>> for DataType {
    fn from(items: Vec<DataType>) -> Self {
        DataType::List(items)
    }
}

impl From<Record> for DataType {
    fn from(record: Record) -> Self {
        DataType::Map(record)
    }
}

impl<T: Into<DataType>> From<Option<T>> for DataType {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataType::Null, Into::into)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Null => write!(f, "<nil>"),
            DataType::Boolean(b) => write!(f, "{}", b),
            DataType::Integer(i) => write!(f, "{}", i),
            DataType::Double(d) => write!(f, "{}", d),
            DataType::String(s) => write!(f, "{}", s),
            DataType::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            DataType::Bytes(b) => {
                write!(f, "[")?;
                for (i, byte) in b.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", byte)?;
                }
                write!(f, "]")
            }
            DataType::Map(record) => write!(f, "{}", record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(DataType::from("v"), DataType::String("v".into()));
        assert_eq!(DataType::from(123i64), DataType::Integer(123));
        assert_eq!(DataType::from(1.5), DataType::Double(1.5));
        assert_eq!(DataType::from(true), DataType::Boolean(true));
        assert_eq!(DataType::from(None::<i64>), DataType::Null);
        assert_eq!(DataType::from(vec![1u8, 2]).type_name(), "bytes");
    }

    #[test]
    fn display() {
        assert_eq!(DataType::Null.to_string(), "<nil>");
        assert_eq!(DataType::from(vec![1u8, 2, 3]).to_string(), "[1 2 3]");
        let list = DataType::List(vec!["a".into(), 7i64.into()]);
        assert_eq!(list.to_string(), "[a 7]");
    }
}
