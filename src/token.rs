//! Upload token issuance / 上传凭证签发
//!
//! Tokens are signed locally, no network call is made.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::Credentials;
use crate::config::{UploadPolicyConfig, MAX_EXPIRES};

/// Absolute deadline `now + ttl` in unix seconds / 计算截止时间
///
/// A missing or zero `ttl` falls back to `default`. Fractions of a second round
/// up and the lifetime is capped at [`MAX_EXPIRES`], so the deadline is always
/// after `now`.
pub(crate) fn deadline_after(now: i64, ttl: Option<Duration>, default: Duration) -> i64 {
    let ttl = ttl.filter(|t| !t.is_zero()).unwrap_or(default);
    let mut secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs = secs.saturating_add(1);
    }
    let secs = i64::try_from(secs.clamp(1, MAX_EXPIRES)).unwrap_or(i64::MAX);
    now.saturating_add(secs)
}

/// Upload policy document / 上传策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// `bucket` or `bucket:key`
    pub scope: String,
    /// Absolute expiry, unix seconds / 截止时间
    pub deadline: i64,
    /// Omitted entirely when unlimited
    #[serde(rename = "fsizeLimit", default, skip_serializing_if = "Option::is_none")]
    pub fsize_limit: Option<u64>,
    #[serde(rename = "mimeLimit", default, skip_serializing_if = "Option::is_none")]
    pub mime_limit: Option<String>,
}

/// Time-bound bearer credential for uploads / 上传凭证
#[derive(Clone, PartialEq, Eq)]
pub struct UploadToken {
    token: String,
    policy: UploadPolicy,
}

impl UploadToken {
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

}

impl fmt::Debug for UploadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadToken")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Token issuer bound to one bucket / 上传凭证签发器
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    credentials: Arc<Credentials>,
    bucket: String,
    policy: UploadPolicyConfig,
    default_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(
        credentials: Arc<Credentials>,
        bucket: impl Into<String>,
        policy: UploadPolicyConfig,
        default_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            bucket: bucket.into(),
            policy,
            default_ttl,
        }
    }

    /// Issue a token; `key` narrows the scope, `ttl` defaults to the configured expiry
    /// 签发上传凭证
    pub fn issue(&self, key: Option<&str>, ttl: Option<Duration>) -> UploadToken {
        self.issue_at(key, ttl, Utc::now().timestamp())
    }

    pub(crate) fn issue_at(&self, key: Option<&str>, ttl: Option<Duration>, now: i64) -> UploadToken {
        let policy = self.build_policy(key, ttl, now);
        // Serializing a struct of strings and integers cannot fail.
        let document = serde_json::to_vec(&policy).unwrap_or_default();
        let token = self.credentials.sign_with_data(&document);

        tracing::debug!("Issued upload token: scope={}, deadline={}", policy.scope, policy.deadline);
        UploadToken { token, policy }
    }

    fn build_policy(&self, key: Option<&str>, ttl: Option<Duration>, now: i64) -> UploadPolicy {
        let scope = match key {
            Some(key) => format!("{}:{}", self.bucket, key),
            None => self.bucket.clone(),
        };

        UploadPolicy {
            scope,
            deadline: deadline_after(now, ttl, self.default_ttl),
            fsize_limit: Some(self.policy.fsize_limit).filter(|limit| *limit > 0),
            mime_limit: self
                .policy
                .mime_limit
                .clone()
                .filter(|mime| !mime.trim().is_empty()),
        }
    }
}
