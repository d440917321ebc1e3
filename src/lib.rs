pub mod config;
pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{DataType, Key, Record, RecordStore};

/// The client surface of a namespaced record database. Code under test takes
/// a `RecordClient` so it can be handed a [`RecordStore`] instead of a live
/// database connection.
pub trait RecordClient: Send + Sync {
    fn put(&self, namespace: &str, set: &str, key: Key, record: Record) -> Result<()>;

    fn get(&self, namespace: &str, set: &str, key: &str) -> Result<Record>;
}
