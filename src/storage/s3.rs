//! S3后端实现
//!
//! 基于rust-s3，凭证从环境变量读取（AWS_ACCESS_KEY_ID等）。
//! 网关不做重试，存储端错误原样上抛。

use async_trait::async_trait;
use bytes::Bytes;
use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::Region;

use super::{HeadObject, ObjectEntry, ObjectStore, StoreError};
use crate::config::S3Config;

/// S3存储后端
pub struct S3Store {
    bucket: Box<Bucket>,
}

impl S3Store {
    /// Create a store with credentials taken from the environment / 从环境变量凭证创建
    pub fn from_env(config: &S3Config) -> anyhow::Result<Self> {
        let credentials = Credentials::from_env()
            .map_err(|e| anyhow::anyhow!("Error getting S3 env credentials: {}", e))?;
        Self::new(config, credentials)
    }

    pub fn new(config: &S3Config, credentials: Credentials) -> anyhow::Result<Self> {
        let region = if config.endpoint.is_empty() {
            Region::Custom {
                region: config.region.clone(),
                endpoint: format!("https://s3.{}.amazonaws.com", config.region),
            }
        } else {
            Region::Custom {
                region: config.region.clone(),
                endpoint: config.endpoint.clone(),
            }
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| anyhow::anyhow!("创建S3 Bucket失败: {}", e))?;

        let bucket = if config.force_path_style {
            bucket.with_path_style()
        } else {
            bucket
        };

        Ok(Self { bucket })
    }

    /// 404归入NotFound，其余错误原样保留文本
    fn map_err(e: S3Error) -> StoreError {
        match e {
            S3Error::HttpFailWithBody(404, _) => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn head(&self, key: &str) -> Result<HeadObject, StoreError> {
        // rust-s3的head_object对404不报错，通过状态码区分
        let (result, code) = self
            .bucket
            .head_object(key)
            .await
            .map_err(Self::map_err)?;

        if code == 404 {
            return Err(StoreError::NotFound);
        }

        let mut headers = Vec::new();
        if let Some(ct) = result.content_type {
            headers.push(("Content-Type".to_string(), ct));
        }
        if let Some(len) = result.content_length {
            headers.push(("Content-Length".to_string(), len.to_string()));
        }
        if let Some(etag) = result.e_tag {
            headers.push(("ETag".to_string(), etag));
        }
        if let Some(lm) = result.last_modified {
            headers.push(("Last-Modified".to_string(), lm));
        }

        Ok(HeadObject {
            status: code,
            headers,
        })
    }

    async fn get(&self, key: &str) -> Result<Bytes, StoreError> {
        let response = self
            .bucket
            .get_object(key)
            .await
            .map_err(Self::map_err)?;
        Ok(response.bytes().clone())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StoreError> {
        let content_type = if content_type.is_empty() {
            "application/octet-stream"
        } else {
            content_type
        };
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.bucket
            .delete_object(key)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn list(
        &self,
        prefix: &str,
        delimiter: &str,
        marker: &str,
        max_keys: u32,
    ) -> Result<Vec<ObjectEntry>, StoreError> {
        // 单页列举，不做分页续传
        let start_after = if marker.is_empty() {
            None
        } else {
            Some(marker.to_string())
        };

        let (result, _code) = self
            .bucket
            .list_page(
                prefix.to_string(),
                Some(delimiter.to_string()),
                None,
                start_after,
                Some(max_keys as usize),
            )
            .await
            .map_err(Self::map_err)?;

        let entries = result
            .contents
            .into_iter()
            .map(|obj| ObjectEntry {
                key: obj.key,
                size: obj.size as u64,
                last_modified: Some(obj.last_modified),
            })
            .collect();

        Ok(entries)
    }
}
