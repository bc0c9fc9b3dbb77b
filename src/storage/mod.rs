//! Object store abstraction / 对象存储抽象
//!
//! The gateway only needs five primitives (head/get/put/delete/list), so the
//! trait exposes exactly those. Alternative backends (S3, in-memory) plug in
//! without touching handler logic. / 网关只依赖五个原语操作，后端可替换

use async_trait::async_trait;
use bytes::Bytes;

pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// Store operation error / 存储操作错误
///
/// "Not found" must stay distinguishable from any other failure: handlers map
/// it to 404 while everything else becomes a 500 with the backend's text.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Object does not exist / 对象不存在
    #[error("404 Not Found")]
    NotFound,
    /// Any other backend failure, message passed through verbatim / 其他后端错误
    #[error("{0}")]
    Backend(String),
}

/// Result of a metadata probe / 元数据探测结果
#[derive(Debug, Clone)]
pub struct HeadObject {
    /// Status code reported by the store / 存储端返回的状态码
    pub status: u16,
    /// Response headers from the store's head call / 存储端head调用返回的头部
    pub headers: Vec<(String, String)>,
}

/// One entry of a listing / 列举结果条目
#[derive(Debug, Clone)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
    pub last_modified: Option<String>,
}

/// Object store interface (provides only primitive operations) / 对象存储接口
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Probe an object's existence and metadata / 探测对象是否存在及其元数据
    async fn head(&self, key: &str) -> Result<HeadObject, StoreError>;

    /// Fetch the whole object payload / 获取完整对象内容
    async fn get(&self, key: &str) -> Result<Bytes, StoreError>;

    /// Write an object / 写入对象
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StoreError>;

    /// Delete an object / 删除对象
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List objects under a prefix, capped at max_keys / 按前缀列举对象
    async fn list(
        &self,
        prefix: &str,
        delimiter: &str,
        marker: &str,
        max_keys: u32,
    ) -> Result<Vec<ObjectEntry>, StoreError>;
}
