use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::datatype::DataType;

/// A row: bin name -> value. Ordered so printing and iteration are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    bins: BTreeMap<String, DataType>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bin(mut self, name: impl Into<String>, value: impl Into<DataType>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the previous value of the bin, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<DataType>) -> Option<DataType> {
        self.bins.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.bins.get(name)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, DataType> {
        self.bins.iter()
    }
}

impl<K: Into<String>, V: Into<DataType>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            bins: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<DataType>, const N: usize> From<[(K, V); N]> for Record {
    fn from(bins: [(K, V); N]) -> Self {
        bins.into_iter().collect()
    }
}

impl IntoIterator for Record {
    type Item = (String, DataType);
    type IntoIter = btree_map::IntoIter<String, DataType>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a DataType);
    type IntoIter = btree_map::Iter<'a, String, DataType>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map[")?;
        for (i, (name, value)) in self.bins.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", name, value)?;
        }
        write!(f, "]")
    }
}
