//! Storage configuration module / 存储配置模块
//!
//! Loads the `storage` namespace of the project configuration document (JSON).
//! `access_key`, `secret_key` and `bucket_name` are required and must be non-empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{StorageError, StorageResult};

/// Environment variable overriding the config file location / 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "STORAGE_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "storage_config.json";

/// Longest accepted token/URL lifetime, ten years in seconds / 最长有效期
pub const MAX_EXPIRES: u64 = 10 * 365 * 24 * 60 * 60;

/// Storage configuration / 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub bucket_name: String,
    /// CDN domain for public URLs, empty means not configured / CDN域名
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub upload_policy: UploadPolicyConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

/// Upload policy defaults / 上传策略默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPolicyConfig {
    /// Token lifetime in seconds / 上传凭证有效期（秒）
    #[serde(default = "default_expires")]
    pub expires: u64,
    /// Max upload size in bytes, 0 means no limit / 文件大小限制
    #[serde(default, rename = "fsizeLimit")]
    pub fsize_limit: u64,
    /// Allowed mime types (e.g. `image/*;application/pdf`), empty means no limit
    #[serde(default)]
    pub mime_limit: Option<String>,
}

/// Download URL settings / 下载链接设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Signed URL lifetime in seconds / 私有链接有效期（秒）
    #[serde(default = "default_expires")]
    pub expires: u64,
    #[serde(default)]
    pub https: bool,
}

/// Remote service hosts / 服务端点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_up_host")]
    pub up_host: String,
    #[serde(default = "default_rs_host")]
    pub rs_host: String,
    #[serde(default = "default_rsf_host")]
    pub rsf_host: String,
}

fn default_expires() -> u64 {
    3600
}

fn default_up_host() -> String {
    "https://up.qiniup.com".to_string()
}

fn default_rs_host() -> String {
    "https://rs.qiniuapi.com".to_string()
}

fn default_rsf_host() -> String {
    "https://rsf.qiniuapi.com".to_string()
}

impl Default for UploadPolicyConfig {
    fn default() -> Self {
        Self {
            expires: default_expires(),
            fsize_limit: 0,
            mime_limit: None,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            expires: default_expires(),
            https: false,
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            up_host: default_up_host(),
            rs_host: default_rs_host(),
            rsf_host: default_rsf_host(),
        }
    }
}

impl StorageConfig {
    /// Build a config in code with default policies / 代码构建配置
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        bucket_name: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            bucket_name: bucket_name.into(),
            domain: None,
            upload_policy: UploadPolicyConfig::default(),
            download: DownloadConfig::default(),
            endpoints: EndpointConfig::default(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>, https: bool) -> Self {
        self.domain = Some(domain.into());
        self.download.https = https;
        self
    }

    /// Load from a JSON file / 从JSON文件加载
    pub fn load(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::Configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            StorageError::Configuration(format!("Failed to read config file: {}", e))
        })?;
        let document: Value = serde_json::from_str(&content).map_err(|e| {
            StorageError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        let config = Self::from_value(document)?;
        tracing::info!("Loaded storage configuration from {:?}", path);
        Ok(config)
    }

    /// Parse the `storage` namespace of an in-memory document / 从内存文档解析
    pub fn from_value(document: Value) -> StorageResult<Self> {
        let section = match document {
            Value::Object(mut map) => map.remove("storage"),
            _ => None,
        }
        .ok_or_else(|| StorageError::Configuration("Missing `storage` section".to_string()))?;

        let config: StorageConfig = serde_json::from_value(section).map_err(|e| {
            StorageError::Configuration(format!("Invalid `storage` section: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields / 校验必填项
    pub fn validate(&self) -> StorageResult<()> {
        let required = [
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("bucket_name", &self.bucket_name),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(StorageError::Configuration(format!(
                    "Missing required configuration: storage.{}",
                    name
                )));
            }
        }
        let expiries = [
            ("upload_policy.expires", self.upload_policy.expires),
            ("download.expires", self.download.expires),
        ];
        for (name, expires) in expiries {
            if expires == 0 || expires > MAX_EXPIRES {
                return Err(StorageError::Configuration(format!(
                    "storage.{} must be between 1 and {} seconds",
                    name, MAX_EXPIRES
                )));
            }
        }
        Ok(())
    }

    /// Configured domain, ignoring empty strings / 已配置的域名
    pub fn domain(&self) -> Option<&str> {
        self.domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn upload_ttl(&self) -> Duration {
        Duration::from_secs(self.upload_policy.expires)
    }

    pub fn download_ttl(&self) -> Duration {
        Duration::from_secs(self.download.expires)
    }
}

/// Config file path: `$STORAGE_CONFIG`, else `./storage_config.json` / 获取配置文件路径
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILE)
}
