use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::datatype::DataType;
use super::key::Key;
use super::record::Record;
use crate::error::{Result, StoreError};
use crate::RecordClient;

/// key -> stored value. Slots hold a `DataType` so `get` re-checks the shape.
type Set = HashMap<String, DataType>;
/// set name -> set
type Namespace = HashMap<String, Set>;

/// In-memory namespace -> set -> key -> record store.
///
/// Every call takes the single lock for its whole duration, so operations are
/// linearizable. Share between threads with `Arc<RecordStore>`.
#[derive(Debug, Default)]
pub struct RecordStore {
    data: Mutex<HashMap<String, Namespace>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `(namespace, set, key)`, replacing any previous
    /// record wholesale. Namespace and set are created on first write.
    ///
    /// Fails with [`StoreError::InvalidKeyType`] for non-string keys, in which
    /// case the store is untouched.
    pub fn put(&self, namespace: &str, set: &str, key: impl Into<Key>, record: Record) -> Result<()> {
        let key = match key.into() {
            Key::String(key) => key,
            other => {
                debug!(namespace, set, key_type = other.type_name(), "rejected put");
                return Err(StoreError::InvalidKeyType {
                    found: other.type_name(),
                });
            }
        };

        let mut data = self.lock()?;
        debug!(namespace, set, key = %key, bins = record.len(), "put");
        data.entry(namespace.to_string())
            .or_default()
            .entry(set.to_string())
            .or_default()
            .insert(key, DataType::Map(record));

        Ok(())
    }

    /// Returns a copy of the record at `(namespace, set, key)`.
    pub fn get(&self, namespace: &str, set: &str, key: &str) -> Result<Record> {
        let data = self.lock()?;

        let ns = data.get(namespace).ok_or_else(|| StoreError::NamespaceNotFound {
            namespace: namespace.to_string(),
        })?;

        let s = ns.get(set).ok_or_else(|| StoreError::SetNotFound {
            namespace: namespace.to_string(),
            set: set.to_string(),
        })?;

        let value = s.get(key).ok_or_else(|| StoreError::KeyNotFound {
            namespace: namespace.to_string(),
            set: set.to_string(),
            key: key.to_string(),
        })?;

        match value {
            DataType::Map(record) => {
                debug!(namespace, set, key, "get");
                Ok(record.clone())
            }
            other => {
                warn!(namespace, set, key, found = other.type_name(), "stored value is not a record");
                Err(StoreError::MalformedRecord {
                    namespace: namespace.to_string(),
                    set: set.to_string(),
                    key: key.to_string(),
                })
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Namespace>>> {
        self.data.lock().map_err(|_| {
            warn!("record store lock poisoned");
            StoreError::LockPoisoned
        })
    }

    /// Writes a raw slot value, bypassing the record-shape guarantee of `put`.
    #[cfg(test)]
    fn put_raw(&self, namespace: &str, set: &str, key: &str, value: DataType) {
        let mut data = self.data.lock().unwrap();
        data.entry(namespace.to_string())
            .or_default()
            .entry(set.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }
}

impl RecordClient for RecordStore {
    fn put(&self, namespace: &str, set: &str, key: Key, record: Record) -> Result<()> {
        RecordStore::put(self, namespace, set, key, record)
    }

    fn get(&self, namespace: &str, set: &str, key: &str) -> Result<Record> {
        RecordStore::get(self, namespace, set, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new().with_bin("bin1", "value1")
    }

    #[test]
    fn test_put_get() {
        let store = RecordStore::new();
        store.put("myNamespace", "mySet", "myKey", sample()).unwrap();

        let record = store.get("myNamespace", "mySet", "myKey").unwrap();
        assert_eq!(record, sample());
    }

    #[test]
    fn test_missing_levels() {
        let store = RecordStore::new();
        assert_eq!(
            store.get("ns", "set", "key"),
            Err(StoreError::NamespaceNotFound { namespace: "ns".into() })
        );

        store.put("ns", "set", "key", sample()).unwrap();
        assert_eq!(
            store.get("ns", "other", "key"),
            Err(StoreError::SetNotFound {
                namespace: "ns".into(),
                set: "other".into(),
            })
        );
        assert_eq!(
            store.get("ns", "set", "missingKey"),
            Err(StoreError::KeyNotFound {
                namespace: "ns".into(),
                set: "set".into(),
                key: "missingKey".into(),
            })
        );
    }

    #[test]
    fn test_invalid_key_leaves_store_empty() {
        let store = RecordStore::new();
        let err = store.put("ns", "set", 42i64, sample()).unwrap_err();
        assert_eq!(err, StoreError::InvalidKeyType { found: "integer" });

        // No namespace was created on the failed put.
        assert!(matches!(
            store.get("ns", "set", "42"),
            Err(StoreError::NamespaceNotFound { .. })
        ));
        assert!(store.data.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_slot() {
        let store = RecordStore::new();
        store.put_raw("ns", "set", "key", DataType::from("not a record"));

        assert_eq!(
            store.get("ns", "set", "key"),
            Err(StoreError::MalformedRecord {
                namespace: "ns".into(),
                set: "set".into(),
                key: "key".into(),
            })
        );
    }

    #[test]
    fn test_returned_record_is_a_copy() {
        let store = RecordStore::new();
        store.put("ns", "set", "key", sample()).unwrap();

        let mut copy = store.get("ns", "set", "key").unwrap();
        copy.insert("bin1", "tampered");

        assert_eq!(store.get("ns", "set", "key").unwrap(), sample());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        use std::sync::Arc;

        let store = Arc::new(RecordStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.data.lock().unwrap();
            panic!("poison the store lock");
        })
        .join();

        assert_eq!(store.put("ns", "set", "key", sample()), Err(StoreError::LockPoisoned));
        assert_eq!(store.get("ns", "set", "key"), Err(StoreError::LockPoisoned));
    }

    #[test]
    fn test_usable_through_trait_object() {
        let store = RecordStore::new();
        let client: &dyn RecordClient = &store;

        client.put("ns", "set", Key::from("key"), sample()).unwrap();
        assert_eq!(client.get("ns", "set", "key").unwrap(), sample());
        assert!(matches!(
            client.put("ns", "set", Key::from(vec![1u8]), sample()),
            Err(StoreError::InvalidKeyType { found: "bytes" })
        ));
    }
}
