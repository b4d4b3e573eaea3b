//! HTTP transport for the storage service REST API / 存储服务HTTP客户端
//!
//! Endpoints:
//! - upload: multipart POST to `up_host`
//! - stat/delete/copy/move: POST `rs_host/<op>/<encoded entry>`
//! - list: POST `rsf_host/list?bucket=..`
//! - fetch: plain GET

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Body, Client};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::{ListOptions, ListRet, ProgressCallback, PutRet, StatRet, StorageTransport, TransportResponse, TransportResult};
use crate::auth::{encoded_entry, Credentials};
use crate::config::EndpointConfig;
use crate::error::TransportError;
use crate::token::UploadToken;

const PROGRESS_CHUNK_SIZE: usize = 64 * 1024;

/// Status code and raw body before decoding / 解码前的原始响应
struct RawResponse {
    status_code: u16,
    body: String,
}

impl RawResponse {
    async fn read(resp: reqwest::Response) -> Result<Self, TransportError> {
        let status_code = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(Self { status_code, body })
    }

    fn into_json<T: DeserializeOwned>(self) -> TransportResult<T> {
        if self.status_code != 200 {
            return Ok(TransportResponse::error(self.status_code, self.body));
        }
        let data = serde_json::from_str(&self.body)?;
        Ok(TransportResponse {
            status_code: self.status_code,
            body: self.body,
            data: Some(data),
        })
    }

    fn into_unit(self) -> TransportResult<()> {
        if self.status_code != 200 {
            return Ok(TransportResponse::error(self.status_code, self.body));
        }
        Ok(TransportResponse {
            status_code: self.status_code,
            body: self.body,
            data: Some(()),
        })
    }
}

/// reqwest-backed transport / 基于reqwest的传输实现
pub struct HttpTransport {
    client: Client,
    credentials: Arc<Credentials>,
    endpoints: EndpointConfig,
}

impl HttpTransport {
    pub fn new(credentials: Arc<Credentials>, endpoints: EndpointConfig) -> Result<Self, TransportError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, credentials, endpoints))
    }

    pub fn with_client(client: Client, credentials: Arc<Credentials>, endpoints: EndpointConfig) -> Self {
        Self {
            client,
            credentials,
            endpoints,
        }
    }

    /// Signed POST to a management host / 管理接口请求
    async fn management(&self, host: &str, path_and_query: &str) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", host.trim_end_matches('/'), path_and_query);
        let authorization = self.credentials.management_authorization(path_and_query, None);

        tracing::debug!("Management request: {}", path_and_query);
        let resp = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, authorization)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?;
        RawResponse::read(resp).await
    }

    /// Chunked body that reports progress as chunks are pulled by the connection
    /// 按块发送并回调进度
    fn progress_stream(
        data: Bytes,
        progress: ProgressCallback,
    ) -> impl futures::Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
        let total = data.len() as u64;
        let mut chunks = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let end = (offset + PROGRESS_CHUNK_SIZE).min(data.len());
            chunks.push(data.slice(offset..end));
            offset = end;
        }

        let mut sent = 0u64;
        stream::iter(chunks.into_iter().map(move |chunk| {
            sent += chunk.len() as u64;
            progress(sent, total);
            Ok::<Bytes, std::io::Error>(chunk)
        }))
    }

    fn progress_part(data: Bytes, progress: ProgressCallback) -> Part {
        let total = data.len() as u64;
        Part::stream_with_length(Body::wrap_stream(Self::progress_stream(data, progress)), total)
    }
}

#[async_trait]
impl StorageTransport for HttpTransport {
    async fn put(
        &self,
        token: &UploadToken,
        key: &str,
        data: Bytes,
        progress: Option<ProgressCallback>,
    ) -> TransportResult<PutRet> {
        let part = match progress {
            Some(progress) => Self::progress_part(data, progress),
            None => Part::bytes(data.to_vec()),
        };
        let form = Form::new()
            .text("token", token.as_str().to_string())
            .text("key", key.to_string())
            .part("file", part.file_name(key.to_string()));

        let resp = self
            .client
            .post(&self.endpoints.up_host)
            .multipart(form)
            .send()
            .await?;
        RawResponse::read(resp).await?.into_json()
    }

    async fn stat(&self, bucket: &str, key: &str) -> TransportResult<StatRet> {
        let path = format!("/stat/{}", encoded_entry(bucket, key));
        self.management(&self.endpoints.rs_host, &path).await?.into_json()
    }

    async fn delete(&self, bucket: &str, key: &str) -> TransportResult<()> {
        let path = format!("/delete/{}", encoded_entry(bucket, key));
        self.management(&self.endpoints.rs_host, &path).await?.into_unit()
    }

    async fn copy(&self, bucket: &str, src_key: &str, dest_key: &str) -> TransportResult<()> {
        let path = format!(
            "/copy/{}/{}",
            encoded_entry(bucket, src_key),
            encoded_entry(bucket, dest_key)
        );
        self.management(&self.endpoints.rs_host, &path).await?.into_unit()
    }

    async fn move_object(&self, bucket: &str, src_key: &str, dest_key: &str) -> TransportResult<()> {
        let path = format!(
            "/move/{}/{}",
            encoded_entry(bucket, src_key),
            encoded_entry(bucket, dest_key)
        );
        self.management(&self.endpoints.rs_host, &path).await?.into_unit()
    }

    async fn list(&self, bucket: &str, options: &ListOptions) -> TransportResult<ListRet> {
        let mut query = format!("bucket={}&limit={}", urlencoding::encode(bucket), options.limit);
        if !options.prefix.is_empty() {
            query.push_str(&format!("&prefix={}", urlencoding::encode(&options.prefix)));
        }
        if !options.marker.is_empty() {
            query.push_str(&format!("&marker={}", urlencoding::encode(&options.marker)));
        }
        let path = format!("/list?{}", query);
        self.management(&self.endpoints.rsf_host, &path).await?.into_json()
    }

    async fn fetch(&self, url: &str) -> TransportResult<Bytes> {
        let resp = self.client.get(url).send().await?;
        let status_code = resp.status().as_u16();
        if status_code != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Ok(TransportResponse::error(status_code, body));
        }
        let data = resp.bytes().await?;
        Ok(TransportResponse::ok(data))
    }
}
