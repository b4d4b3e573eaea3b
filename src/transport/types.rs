//! Storage service response types / 存储服务响应类型

use serde::{Deserialize, Serialize};

/// Upload response / 上传响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PutRet {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub key: String,
}

/// Stat response / 元信息响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatRet {
    #[serde(default)]
    pub fsize: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default, rename = "putTime")]
    pub put_time: i64,
    #[serde(default, rename = "mimeType")]
    pub mime_type: String,
}

/// Listing item / 列表条目
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListItem {
    pub key: String,
    #[serde(default)]
    pub fsize: u64,
    #[serde(default)]
    pub hash: String,
    #[serde(default, rename = "putTime")]
    pub put_time: i64,
    #[serde(default, rename = "mimeType")]
    pub mime_type: String,
}

/// Listing response / 列表响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListRet {
    /// Empty when there are no more pages / 无更多数据时为空
    #[serde(default)]
    pub marker: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

impl ListRet {
    pub fn is_end(&self) -> bool {
        self.marker.is_empty()
    }
}
