//! Key-value document store seam.
//!
//! Persistence is an external collaborator: the orchestrator writes and reads
//! one whole [`FeatureCollection`] per logical key and never updates part of a
//! document. [`MemoryStore`] keeps documents as serialized JSON.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::vector::FeatureCollection;

/// An opaque key-value store for whole feature collections
pub trait DocumentStore: Send + Sync {
    /// Replace the document stored under `key`
    fn store(&self, key: &str, collection: &FeatureCollection) -> impl Future<Output = Result<()>> + Send;

    /// Fetch the document stored under `key`, if any
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<FeatureCollection>>> + Send;

    /// Remove the document stored under `key`; missing keys are not an error
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// In-process store holding each document as JSON text
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every document
    pub fn clear(&self) -> Result<()> {
        self.documents.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Store("document lock poisoned".into())
}

impl DocumentStore for MemoryStore {
    async fn store(&self, key: &str, collection: &FeatureCollection) -> Result<()> {
        let json = serde_json::to_string(collection)?;
        self.documents
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), json);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<FeatureCollection>> {
        let documents = self.documents.read().map_err(poisoned)?;
        match documents.get(key) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.documents.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Feature;
    use geo_types::{Geometry, Point};

    fn collection(n: usize) -> FeatureCollection {
        (0..n)
            .map(|i| Feature::new(Geometry::Point(Point::new(i as f64, 0.0))).with_id(format!("f{i}")))
            .collect()
    }

    #[tokio::test]
    async fn test_store_then_get() {
        let store = MemoryStore::new();
        store.store("current-segments", &collection(3)).await.unwrap();

        let back = store.get("current-segments").await.unwrap().unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back.features[2].id.as_deref(), Some("f2"));
    }

    #[tokio::test]
    async fn test_store_replaces_whole_document() {
        let store = MemoryStore::new();
        store.store("k", &collection(5)).await.unwrap();
        store.store("k", &collection(2)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap().len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_and_deleted_keys() {
        let store = MemoryStore::new();
        assert!(store.get("nope").await.unwrap().is_none());

        store.store("k", &collection(1)).await.unwrap();
        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.is_empty());
    }
}
