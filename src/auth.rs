//! Credentials and request signing / 凭证与签名
//!
//! All signatures are HMAC-SHA1 over the signed data, encoded with URL-safe
//! base64 (padded), and prefixed by the access key: `access_key:encoded_sign`.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

/// URL-safe base64 (with padding) / URL安全的base64编码
pub fn urlsafe_b64(data: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(data)
}

/// Encoded bucket entry `bucket:key` used by management endpoints / 编码的资源标识
pub fn encoded_entry(bucket: &str, key: &str) -> String {
    urlsafe_b64(format!("{}:{}", bucket, key))
}

/// Access/secret key pair, immutable for the lifetime of the client / 访问凭证
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Raw HMAC-SHA1 signature, URL-safe base64 encoded / 原始签名
    fn encoded_sign(&self, data: &[u8]) -> String {
        // HMAC is defined for keys of any length.
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(data);
        urlsafe_b64(mac.finalize().into_bytes())
    }

    /// `access_key:encoded_sign` / 签名
    pub fn sign(&self, data: &[u8]) -> String {
        format!("{}:{}", self.access_key, self.encoded_sign(data))
    }

    /// Sign data and carry the encoded data along: `access_key:encoded_sign:encoded_data`
    /// 签名并附带编码后的数据（上传凭证格式）
    pub fn sign_with_data(&self, data: &[u8]) -> String {
        let encoded_data = urlsafe_b64(data);
        format!(
            "{}:{}:{}",
            self.access_key,
            self.encoded_sign(encoded_data.as_bytes()),
            encoded_data
        )
    }

    /// Management request authorization header value / 管理接口授权头
    ///
    /// Signed data is the request path (with query) followed by a newline, and
    /// the body when it is form-encoded.
    pub fn management_authorization(&self, path_and_query: &str, form_body: Option<&str>) -> String {
        let mut data = format!("{}\n", path_and_query);
        if let Some(body) = form_body {
            data.push_str(body);
        }
        format!("QBox {}", self.sign(data.as_bytes()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .finish()
    }
}
