//! Remote transport seam / 远端传输接口
//!
//! The gateway never speaks HTTP itself; it calls a `StorageTransport` and
//! normalizes whatever status and body come back.

mod http;
#[cfg(test)]
pub(crate) mod memory;
mod types;

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

pub use http::HttpTransport;
pub use types::{ListItem, ListRet, PutRet, StatRet};

use crate::error::TransportError;
use crate::token::UploadToken;

/// Progress callback type / 进度回调类型
/// Parameters: (sent_bytes, total_bytes) / 参数: (已发送字节数, 总字节数)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

pub type TransportResult<T> = Result<TransportResponse<T>, TransportError>;

/// Raw outcome of one remote call / 单次远端调用结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse<T> {
    pub status_code: u16,
    /// Response body text, kept for error reporting / 响应正文
    pub body: String,
    /// Decoded payload, present when `status_code == 200`
    pub data: Option<T>,
}

impl<T> TransportResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status_code: 200,
            body: String::new(),
            data: Some(data),
        }
    }

    pub fn error(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
            data: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// Listing arguments / 列表参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub prefix: String,
    pub limit: usize,
    /// Empty means start from the beginning / 空表示从头开始
    pub marker: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            limit: 100,
            marker: String::new(),
        }
    }
}

impl ListOptions {
    pub fn new(prefix: impl Into<String>, limit: usize, marker: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            limit,
            marker: marker.into(),
        }
    }
}

/// Storage service client / 存储服务客户端
#[async_trait]
pub trait StorageTransport: Send + Sync {
    /// Upload content under `key` using `token` / 上传
    async fn put(
        &self,
        token: &UploadToken,
        key: &str,
        data: Bytes,
        progress: Option<ProgressCallback>,
    ) -> TransportResult<PutRet>;

    /// Object metadata / 元信息
    async fn stat(&self, bucket: &str, key: &str) -> TransportResult<StatRet>;

    async fn delete(&self, bucket: &str, key: &str) -> TransportResult<()>;

    /// Server-side copy within one bucket / 同空间复制
    async fn copy(&self, bucket: &str, src_key: &str, dest_key: &str) -> TransportResult<()>;

    /// Server-side move within one bucket / 同空间移动
    async fn move_object(&self, bucket: &str, src_key: &str, dest_key: &str) -> TransportResult<()>;

    /// One page of objects / 分页列举
    async fn list(&self, bucket: &str, options: &ListOptions) -> TransportResult<ListRet>;

    /// Plain GET of a (signed) URL / 下载
    async fn fetch(&self, url: &str) -> TransportResult<Bytes>;
}
