//! # In-Memory Bytecode Store
//!
//! Content store adapter backed by a `HashMap` of pinned documents.

use crate::errors::CompatibilityError;
use crate::ports::outbound::BytecodeStore;
use async_trait::async_trait;
use shared_types::Bytes;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory content store for testing.
#[derive(Debug, Default)]
pub struct InMemoryBytecodeStore {
    /// Pinned documents by URI.
    documents: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryBytecodeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a bytecode document under a URI.
    pub fn pin(&self, uri: impl Into<String>, bytecode: Bytes) {
        if let Ok(mut documents) = self.documents.write() {
            documents.insert(uri.into(), bytecode);
        }
    }
}

#[async_trait]
impl BytecodeStore for InMemoryBytecodeStore {
    async fn fetch(&self, uri: &str) -> Result<Bytes, CompatibilityError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| CompatibilityError::Storage {
                uri: uri.to_string(),
                reason: "store poisoned".to_string(),
            })?;

        documents
            .get(uri)
            .cloned()
            .ok_or_else(|| CompatibilityError::Storage {
                uri: uri.to_string(),
                reason: "document not pinned".to_string(),
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pin_and_fetch() {
        let store = InMemoryBytecodeStore::new();
        store.pin("ipfs://QmCode", Bytes::from(vec![0x60, 0x80, 0x60, 0x40]));

        let fetched = store.fetch("ipfs://QmCode").await.unwrap();
        assert_eq!(fetched.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let store = InMemoryBytecodeStore::new();
        let err = store.fetch("ipfs://QmMissing").await.unwrap_err();
        assert!(matches!(err, CompatibilityError::Storage { .. }));
    }
}
