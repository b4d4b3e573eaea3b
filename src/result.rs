//! Uniform operation result contract / 统一操作结果
//!
//! Every gateway call returns `OperationResult<T>`: either a success payload or
//! a failure, never both. `to_json` renders the flat `{success, ...}` shape
//! consumed by the document pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

/// Failure classification / 失败分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Remote service answered with a non-200 status / 远端返回非200
    Remote,
    /// Request did not complete (connection, decode, non-200 fetch) / 网络错误
    Network,
    /// Local directory or file IO failed / 本地路径错误
    Path,
    /// Download URL could not be resolved / 签名链接生成失败
    Signature,
}

/// Failure branch / 失败结果
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{error}")]
pub struct OperationFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub kind: FailureKind,
}

impl OperationFailure {
    pub fn remote(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            error: body.into(),
            status_code: Some(status_code),
            kind: FailureKind::Remote,
        }
    }

    pub fn new(kind: FailureKind, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status_code: None,
            kind,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Result of one gateway operation / 单次操作结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult<T> {
    Success(T),
    Failure(OperationFailure),
}

impl<T> OperationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            OperationResult::Success(value) => Some(value),
            OperationResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&OperationFailure> {
        match self {
            OperationResult::Success(_) => None,
            OperationResult::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<T, OperationFailure> {
        match self {
            OperationResult::Success(value) => Ok(value),
            OperationResult::Failure(failure) => Err(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self {
            OperationResult::Success(value) => OperationResult::Success(f(value)),
            OperationResult::Failure(failure) => OperationResult::Failure(failure),
        }
    }
}

impl<T> From<Result<T, OperationFailure>> for OperationResult<T> {
    fn from(result: Result<T, OperationFailure>) -> Self {
        match result {
            Ok(value) => OperationResult::Success(value),
            Err(failure) => OperationResult::Failure(failure),
        }
    }
}

impl<T: Serialize> OperationResult<T> {
    /// Flat JSON rendering / 扁平JSON输出
    ///
    /// Success: `{"success": true, ...payload fields}`.
    /// Failure: `{"success": false, "error": .., "status_code": ..}`.
    pub fn to_json(&self) -> Value {
        let (success, body) = match self {
            OperationResult::Success(value) => (true, serde_json::to_value(value)),
            OperationResult::Failure(failure) => (false, serde_json::to_value(failure)),
        };
        let mut map = match body {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
            Err(e) => {
                let mut map = Map::new();
                map.insert("error".to_string(), Value::String(e.to_string()));
                map
            }
        };
        map.insert("success".to_string(), Value::Bool(success));
        Value::Object(map)
    }
}

/// Normalized object metadata / 文件元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub key: String,
    pub size: u64,
    pub hash: String,
    /// Upload time in 100ns units since epoch, as reported by the service
    pub put_time: i64,
    pub mime_type: String,
    pub url: Option<String>,
}

/// Upload / 上传结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uploaded {
    pub key: String,
    pub hash: String,
    pub size: u64,
    pub url: Option<String>,
}

/// Download / 下载结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Downloaded {
    pub key: String,
    pub local_path: PathBuf,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub key: String,
}

/// Copy or move / 复制或移动结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transferred {
    pub src_key: String,
    pub dest_key: String,
}

/// One page of a listing / 列表分页
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage {
    pub files: Vec<FileRecord>,
    pub is_end: bool,
    /// Continuation cursor, empty on the last page / 分页标记
    pub marker: String,
    pub total: usize,
}
