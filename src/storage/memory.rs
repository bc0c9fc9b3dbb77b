//! In-memory store backend / 内存存储后端
//!
//! Used by the test suite and for local development without S3 credentials.
//! Listing is a flat prefix scan in key order; the delimiter is accepted but
//! not used for grouping. / 列举为按键序的前缀扫描，不做分隔符分组

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use super::{HeadObject, ObjectEntry, ObjectStore, StoreError};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// In-memory object store / 内存对象存储
#[derive(Default)]
pub struct MemoryStore {
    // BTreeMap保证列举顺序稳定（按键字典序，与S3一致）
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects / 已存储对象数量
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Check a fully-resolved key / 检查完整键是否存在
    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn head(&self, key: &str) -> Result<HeadObject, StoreError> {
        let objects = self.objects.read();
        let obj = objects.get(key).ok_or(StoreError::NotFound)?;

        Ok(HeadObject {
            status: 200,
            headers: vec![
                ("Content-Type".to_string(), obj.content_type.clone()),
                ("Content-Length".to_string(), obj.data.len().to_string()),
            ],
        })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let objects = self.objects.read();
        let obj = objects.get(key).ok_or(StoreError::NotFound)?;
        Ok(obj.data.clone())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StoreError> {
        let content_type = if content_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            content_type.to_string()
        };
        self.objects
            .write()
            .insert(key.to_string(), StoredObject { data, content_type });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.objects.write().remove(key);
        Ok(())
    }

    async fn list(
        &self,
        prefix: &str,
        _delimiter: &str,
        marker: &str,
        max_keys: u32,
    ) -> Result<Vec<ObjectEntry>, StoreError> {
        let objects = self.objects.read();
        let entries = objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix) && key.as_str() > marker)
            .take(max_keys as usize)
            .map(|(key, obj)| ObjectEntry {
                key: key.clone(),
                size: obj.data.len() as u64,
                last_modified: None,
            })
            .collect();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .put("a/b.txt", Bytes::from_static(b"hello"), "text/plain")
            .await
            .unwrap();

        let data = store.get("a/b.txt").await.unwrap();
        assert_eq!(&data[..], b"hello");

        let head = store.head("a/b.txt").await.unwrap();
        assert_eq!(head.status, 200);
        assert!(head
            .headers
            .contains(&("Content-Type".to_string(), "text/plain".to_string())));
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.head("nope").await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(store.get("nope").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_removes_key() {
        let store = MemoryStore::new();
        store
            .put("x", Bytes::from_static(b"1"), "")
            .await
            .unwrap();
        store.delete("x").await.unwrap();
        assert!(matches!(store.head("x").await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_by_prefix_in_key_order() {
        let store = MemoryStore::new();
        for key in ["a/y", "a/x", "b/z"] {
            store.put(key, Bytes::from_static(b"1"), "").await.unwrap();
        }

        let entries = store.list("a", "/", "", 1000).await.unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a/x", "a/y"]);
    }

    #[tokio::test]
    async fn test_list_caps_at_max_keys() {
        let store = MemoryStore::new();
        for i in 0..1005 {
            store
                .put(&format!("k/{:04}", i), Bytes::from_static(b"1"), "")
                .await
                .unwrap();
        }

        let entries = store.list("k/", "/", "", 1000).await.unwrap();
        assert_eq!(entries.len(), 1000);
    }

    #[tokio::test]
    async fn test_list_respects_marker() {
        let store = MemoryStore::new();
        for key in ["a/1", "a/2", "a/3"] {
            store.put(key, Bytes::from_static(b"1"), "").await.unwrap();
        }

        let entries = store.list("a/", "/", "a/1", 1000).await.unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a/2", "a/3"]);
    }
}
