//! Public and signed access URLs / 公开链接与私有签名链接

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::Credentials;
use crate::error::{StorageError, StorageResult};
use crate::token::deadline_after;

/// URL signer for one bucket domain / 链接签名器
#[derive(Debug, Clone)]
pub struct UrlSigner {
    credentials: Arc<Credentials>,
    domain: Option<String>,
    https: bool,
    default_ttl: Duration,
}

impl UrlSigner {
    pub fn new(credentials: Arc<Credentials>, domain: Option<String>, https: bool, default_ttl: Duration) -> Self {
        Self {
            credentials,
            domain: domain.filter(|d| !d.trim().is_empty()),
            https,
            default_ttl,
        }
    }

    /// `{protocol}://{domain}/{key}`, no signing / 公开访问链接
    pub fn public_url(&self, key: &str) -> StorageResult<String> {
        let domain = self.domain.as_deref().ok_or_else(|| {
            StorageError::Configuration("Domain not configured for public URL generation".to_string())
        })?;
        let protocol = if self.https { "https" } else { "http" };
        Ok(format!("{}://{}/{}", protocol, domain.trim(), key))
    }

    /// Time-bound signed URL / 私有签名链接
    pub fn private_url(&self, key: &str, ttl: Option<Duration>) -> StorageResult<String> {
        self.private_url_at(key, ttl, Utc::now().timestamp())
    }

    pub(crate) fn private_url_at(&self, key: &str, ttl: Option<Duration>, now: i64) -> StorageResult<String> {
        if self.domain.is_none() {
            return Err(StorageError::Configuration(
                "Domain not configured for private URL generation".to_string(),
            ));
        }
        let deadline = deadline_after(now, ttl, self.default_ttl);
        Ok(self.sign_url(&self.public_url(key)?, deadline))
    }

    /// Download link; the bucket is treated as private so this is always signed
    /// 下载链接（默认按私有空间处理）
    pub fn download_url(&self, key: &str, ttl: Option<Duration>) -> StorageResult<String> {
        self.private_url(key, ttl)
    }

    /// Append `e=<deadline>` and the `token` over the resulting URL / 为链接追加签名
    pub fn sign_url(&self, base_url: &str, deadline: i64) -> String {
        let separator = if base_url.contains('?') { '&' } else { '?' };
        let url = format!("{}{}e={}", base_url, separator, deadline);
        let token = self.credentials.sign(url.as_bytes());
        format!("{}&token={}", url, token)
    }
}
