use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("key is not a string (got {found})")]
    InvalidKeyType { found: &'static str },

    #[error("namespace {namespace} not found")]
    NamespaceNotFound { namespace: String },

    #[error("set {set} not found in namespace {namespace}")]
    SetNotFound { namespace: String, set: String },

    #[error("key {key} not found in set {set} of namespace {namespace}")]
    KeyNotFound {
        namespace: String,
        set: String,
        key: String,
    },

    #[error("unexpected data type for key {key} in set {set} of namespace {namespace}")]
    MalformedRecord {
        namespace: String,
        set: String,
        key: String,
    },

    #[error("store lock poisoned by a panicking caller")]
    LockPoisoned,
}

impl StoreError {
    /// True for the three traversal misses reported by `get`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NamespaceNotFound { .. }
                | StoreError::SetNotFound { .. }
                | StoreError::KeyNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_every_level() {
        let err = StoreError::KeyNotFound {
            namespace: "myNamespace".into(),
            set: "mySet".into(),
            key: "missingKey".into(),
        };
        assert_eq!(
            err.to_string(),
            "key missingKey not found in set mySet of namespace myNamespace"
        );

        let err = StoreError::SetNotFound {
            namespace: "ns".into(),
            set: "s".into(),
        };
        assert_eq!(err.to_string(), "set s not found in namespace ns");
    }

    #[test]
    fn not_found_classification() {
        assert!(StoreError::NamespaceNotFound { namespace: "ns".into() }.is_not_found());
        assert!(!StoreError::InvalidKeyType { found: "integer" }.is_not_found());
        assert!(!StoreError::LockPoisoned.is_not_found());
    }
}
