//! Error types / 错误类型
//!
//! Hard failures (`StorageError`) are returned as `Err` before any remote call.
//! Remote outcomes never use these types, they are normalized into
//! `OperationResult` instead.

use thiserror::Error;

/// Result alias for hard failures / 硬错误结果类型
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors signaled immediately to the caller / 直接返回给调用方的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Missing/invalid credentials, bucket identity or domain / 配置错误
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Referenced local file or path does not exist / 本地文件不存在
    #[error("Local input error: {0}")]
    LocalInput(String),
}

/// Errors raised inside a transport implementation / 传输层错误
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
