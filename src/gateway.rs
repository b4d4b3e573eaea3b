//! Storage gateway / 存储网关
//!
//! One normalized contract over the remote bucket operations:
//! - local precondition failures are returned as `Err(StorageError)` before any network call
//! - every remote outcome (200 or not, reachable or not) becomes an `OperationResult`
//!
//! No retries and no cross-call state. A gateway is `Send + Sync` and can be
//! shared across tasks behind an `Arc`.

use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::Credentials;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};
use crate::result::{
    Deleted, Downloaded, FailureKind, FileRecord, ListPage, OperationFailure, OperationResult, Transferred, Uploaded,
};
use crate::signer::UrlSigner;
use crate::token::{TokenIssuer, UploadToken};
use crate::transport::{HttpTransport, ListOptions, ProgressCallback, StorageTransport, TransportResult};

/// Bucket client / 存储空间客户端
pub struct StorageGateway {
    bucket: String,
    issuer: TokenIssuer,
    signer: UrlSigner,
    transport: Arc<dyn StorageTransport>,
}

impl StorageGateway {
    /// Create a gateway speaking HTTP to the configured endpoints / 创建HTTP网关
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        config.validate()?;
        let credentials = Arc::new(Credentials::new(&config.access_key, &config.secret_key));
        let transport = HttpTransport::new(credentials.clone(), config.endpoints.clone())
            .map_err(|e| StorageError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::assemble(config, credentials, Arc::new(transport)))
    }

    /// Load the config file and create a gateway / 从配置文件创建
    pub fn from_config_file(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::new(StorageConfig::load(path)?)
    }

    /// Create a gateway over a custom transport / 使用自定义传输层
    pub fn with_transport(config: StorageConfig, transport: Arc<dyn StorageTransport>) -> StorageResult<Self> {
        config.validate()?;
        let credentials = Arc::new(Credentials::new(&config.access_key, &config.secret_key));
        Ok(Self::assemble(config, credentials, transport))
    }

    fn assemble(config: StorageConfig, credentials: Arc<Credentials>, transport: Arc<dyn StorageTransport>) -> Self {
        let signer = UrlSigner::new(
            credentials.clone(),
            config.domain().map(str::to_string),
            config.download.https,
            config.download_ttl(),
        );
        let upload_ttl = config.upload_ttl();
        let issuer = TokenIssuer::new(credentials, config.bucket_name.clone(), config.upload_policy, upload_ttl);

        tracing::info!("Storage client initialized, bucket: {}", config.bucket_name);
        Self {
            bucket: config.bucket_name,
            issuer,
            signer,
            transport,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload token, see [`TokenIssuer::issue`] / 生成上传凭证
    pub fn upload_token(&self, key: Option<&str>, ttl: Option<Duration>) -> UploadToken {
        self.issuer.issue(key, ttl)
    }

    pub fn public_url(&self, key: &str) -> StorageResult<String> {
        self.signer.public_url(key)
    }

    pub fn private_url(&self, key: &str, ttl: Option<Duration>) -> StorageResult<String> {
        self.signer.private_url(key, ttl)
    }

    pub fn download_url(&self, key: &str, ttl: Option<Duration>) -> StorageResult<String> {
        self.signer.download_url(key, ttl)
    }

    /// Public URL when a domain is configured / 配置了域名时的公开链接
    fn optional_url(&self, key: &str) -> Option<String> {
        self.signer.public_url(key).ok()
    }

    /// Upload a local file / 上传本地文件
    ///
    /// Fails with `StorageError::LocalInput` before issuing a token when the
    /// path is not an existing regular file.
    pub async fn upload(
        &self,
        local_path: impl AsRef<Path>,
        remote_key: &str,
        progress: Option<ProgressCallback>,
    ) -> StorageResult<OperationResult<Uploaded>> {
        let local_path = local_path.as_ref();
        let size = match tokio::fs::metadata(local_path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                return Err(StorageError::LocalInput(format!(
                    "Local file not found: {}",
                    local_path.display()
                )))
            }
        };
        let data = tokio::fs::read(local_path).await.map_err(|e| {
            StorageError::LocalInput(format!("Failed to read {}: {}", local_path.display(), e))
        })?;

        let result = self.put(remote_key, Bytes::from(data), size, progress).await;
        if result.is_success() {
            tracing::info!("File uploaded: {} -> {}", local_path.display(), remote_key);
        }
        Ok(result)
    }

    /// Upload an in-memory buffer / 上传内存数据
    pub async fn upload_bytes(&self, data: impl Into<Bytes>, remote_key: &str) -> OperationResult<Uploaded> {
        let data = data.into();
        let size = data.len() as u64;
        let result = self.put(remote_key, data, size, None).await;
        if result.is_success() {
            tracing::info!("Data uploaded: {} ({} bytes)", remote_key, size);
        }
        result
    }

    async fn put(
        &self,
        remote_key: &str,
        data: Bytes,
        size: u64,
        progress: Option<ProgressCallback>,
    ) -> OperationResult<Uploaded> {
        let token = self.issuer.issue(Some(remote_key), None);
        let outcome = self.transport.put(&token, remote_key, data, progress).await;
        normalize("upload", remote_key, outcome, |ret| Uploaded {
            key: remote_key.to_string(),
            hash: ret.hash,
            size,
            url: self.optional_url(remote_key),
        })
    }

    /// Download through a signed URL into `local_path` / 通过签名链接下载
    ///
    /// Never returns `Err`: URL, network and local IO failures are all
    /// reported as a classified `OperationResult::Failure`.
    pub async fn download(&self, remote_key: &str, local_path: impl AsRef<Path>) -> OperationResult<Downloaded> {
        let local_path = local_path.as_ref();
        let result: OperationResult<Downloaded> = self.try_download(remote_key, local_path).await.into();
        match &result {
            OperationResult::Success(_) => {
                tracing::info!("File downloaded: {} -> {}", remote_key, local_path.display())
            }
            OperationResult::Failure(failure) => {
                tracing::error!("Download failed: {}: {:?}: {}", remote_key, failure.kind, failure.error)
            }
        }
        result
    }

    async fn try_download(&self, remote_key: &str, local_path: &Path) -> Result<Downloaded, OperationFailure> {
        let url = self
            .signer
            .download_url(remote_key, None)
            .map_err(|e| OperationFailure::new(FailureKind::Signature, e.to_string()))?;

        let resp = self
            .transport
            .fetch(&url)
            .await
            .map_err(|e| OperationFailure::new(FailureKind::Network, e.to_string()))?;
        if !resp.is_ok() {
            let error = format!("HTTP {}: {}", resp.status_code, resp.body.trim());
            return Err(OperationFailure::new(FailureKind::Network, error).with_status(resp.status_code));
        }
        let data = resp.data.unwrap_or_default();

        if let Some(parent) = local_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                OperationFailure::new(FailureKind::Path, format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        tokio::fs::write(local_path, &data).await.map_err(|e| {
            OperationFailure::new(FailureKind::Path, format!("Failed to write {}: {}", local_path.display(), e))
        })?;

        Ok(Downloaded {
            key: remote_key.to_string(),
            local_path: local_path.to_path_buf(),
            size: data.len() as u64,
        })
    }

    /// Delete an object / 删除文件
    pub async fn delete(&self, remote_key: &str) -> OperationResult<Deleted> {
        let outcome = self.transport.delete(&self.bucket, remote_key).await;
        let result = normalize("delete", remote_key, outcome, |_| Deleted {
            key: remote_key.to_string(),
        });
        if result.is_success() {
            tracing::info!("File deleted: {}", remote_key);
        }
        result
    }

    /// Copy within the bucket / 复制文件
    pub async fn copy(&self, src_key: &str, dest_key: &str) -> OperationResult<Transferred> {
        let outcome = self.transport.copy(&self.bucket, src_key, dest_key).await;
        let result = normalize("copy", src_key, outcome, |_| transferred(src_key, dest_key));
        if result.is_success() {
            tracing::info!("File copied: {} -> {}", src_key, dest_key);
        }
        result
    }

    /// Move within the bucket / 移动文件
    pub async fn move_object(&self, src_key: &str, dest_key: &str) -> OperationResult<Transferred> {
        let outcome = self.transport.move_object(&self.bucket, src_key, dest_key).await;
        let result = normalize("move", src_key, outcome, |_| transferred(src_key, dest_key));
        if result.is_success() {
            tracing::info!("File moved: {} -> {}", src_key, dest_key);
        }
        result
    }

    /// One page of objects; pass the returned marker to continue / 分页列出文件
    pub async fn list(&self, prefix: &str, limit: usize, marker: &str) -> OperationResult<ListPage> {
        self.list_with(&ListOptions::new(prefix, limit, marker)).await
    }

    pub async fn list_with(&self, options: &ListOptions) -> OperationResult<ListPage> {
        let outcome = self.transport.list(&self.bucket, options).await;
        normalize("list", &options.prefix, outcome, |ret| {
            let is_end = ret.is_end();
            let files: Vec<FileRecord> = ret
                .items
                .into_iter()
                .map(|item| FileRecord {
                    url: self.optional_url(&item.key),
                    key: item.key,
                    size: item.fsize,
                    hash: item.hash,
                    put_time: item.put_time,
                    mime_type: item.mime_type,
                })
                .collect();
            tracing::debug!("Listed {} files under {:?}, is_end={}", files.len(), options.prefix, is_end);
            ListPage {
                total: files.len(),
                files,
                is_end,
                marker: ret.marker,
            }
        })
    }

    /// Whether the object exists; any failure counts as absent / 检查文件是否存在
    pub async fn exists(&self, remote_key: &str) -> bool {
        match self.transport.stat(&self.bucket, remote_key).await {
            Ok(resp) => resp.is_ok(),
            Err(e) => {
                tracing::debug!("Existence check failed for {}: {}", remote_key, e);
                false
            }
        }
    }

    /// Object metadata / 获取文件信息
    pub async fn stat(&self, remote_key: &str) -> OperationResult<FileRecord> {
        let outcome = self.transport.stat(&self.bucket, remote_key).await;
        normalize("stat", remote_key, outcome, |ret| FileRecord {
            key: remote_key.to_string(),
            size: ret.fsize,
            hash: ret.hash,
            put_time: ret.put_time,
            mime_type: ret.mime_type,
            url: self.optional_url(remote_key),
        })
    }
}

fn transferred(src_key: &str, dest_key: &str) -> Transferred {
    Transferred {
        src_key: src_key.to_string(),
        dest_key: dest_key.to_string(),
    }
}

/// Status 200 is success, anything else is a failure carrying the body / 统一结果转换
fn normalize<T: Default, U>(
    op: &str,
    target: &str,
    outcome: TransportResult<T>,
    on_success: impl FnOnce(T) -> U,
) -> OperationResult<U> {
    match outcome {
        Ok(resp) if resp.is_ok() => OperationResult::Success(on_success(resp.data.unwrap_or_default())),
        Ok(resp) => {
            tracing::error!("{} failed: {}: status={}, body={}", op, target, resp.status_code, resp.body);
            OperationResult::Failure(OperationFailure::remote(resp.status_code, resp.body))
        }
        Err(e) => {
            tracing::error!("{} failed: {}: {}", op, target, e);
            OperationResult::Failure(OperationFailure::new(FailureKind::Network, e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::memory::MemoryTransport;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn config(domain: Option<&str>) -> StorageConfig {
        let config = StorageConfig::new("ak", "sk", "artifacts");
        match domain {
            Some(domain) => config.with_domain(domain, true),
            None => config,
        }
    }

    fn gateway(domain: Option<&str>) -> (StorageGateway, Arc<MemoryTransport>) {
        let transport = Arc::new(MemoryTransport::new());
        let gateway = StorageGateway::with_transport(config(domain), transport.clone()).unwrap();
        (gateway, transport)
    }

    /// Exactly one of the success/error shapes is present
    fn assert_exclusive(json: &serde_json::Value) {
        let has_error = json.get("error").is_some() || json.get("status_code").is_some();
        if json["success"] == true {
            assert!(!has_error, "success result carries error fields: {}", json);
        } else {
            assert!(json.get("error").is_some(), "failure without error: {}", json);
            for field in ["key", "hash", "size", "url", "files", "src_key"] {
                assert!(json.get(field).is_none(), "failure carries {}: {}", field, json);
            }
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let transport = Arc::new(MemoryTransport::new());
        let result = StorageGateway::with_transport(StorageConfig::new("ak", "", "b"), transport);
        assert!(matches!(result, Err(StorageError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_upload_bytes_round_trip() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        let result = gateway.upload_bytes(&b"hello"[..], "test/a.txt").await;

        let uploaded = result.success().unwrap();
        assert_eq!(uploaded.key, "test/a.txt");
        assert_eq!(uploaded.size, 5);
        assert_eq!(uploaded.url.as_deref(), Some("https://cdn.example.com/test/a.txt"));
        assert!(!uploaded.hash.is_empty());
        assert_eq!(transport.object("test/a.txt").unwrap(), Bytes::from_static(b"hello"));
        assert_exclusive(&result.to_json());

        // Token was scoped to the uploaded key
        let tokens = transport.tokens();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].policy().scope, "artifacts:test/a.txt");
    }

    #[tokio::test]
    async fn test_upload_without_domain_has_no_url() {
        let (gateway, _) = gateway(None);
        let uploaded = gateway.upload_bytes("text payload", "a.txt").await.into_result().unwrap();
        assert_eq!(uploaded.size, 12);
        assert!(uploaded.url.is_none());
    }

    #[tokio::test]
    async fn test_upload_file_reports_size_and_progress() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, vec![1u8; 2048]).unwrap();

        let reported = Arc::new(AtomicU64::new(0));
        let seen = reported.clone();
        let progress: ProgressCallback = Arc::new(move |sent, _| seen.store(sent, Ordering::SeqCst));

        let result = gateway.upload(&path, "docs/report.pdf", Some(progress)).await.unwrap();
        let uploaded = result.success().unwrap();
        assert_eq!(uploaded.size, 2048);
        assert_eq!(reported.load(Ordering::SeqCst), 2048);
        assert_eq!(transport.object("docs/report.pdf").unwrap().len(), 2048);
    }

    #[tokio::test]
    async fn test_upload_missing_file_fails_before_token() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        let err = gateway.upload("/no/such/file.pdf", "a.pdf", None).await.unwrap_err();
        assert!(matches!(err, StorageError::LocalInput(_)));
        assert!(transport.calls().is_empty());
        assert!(transport.tokens().is_empty());

        let dir = tempfile::tempdir().unwrap();
        let err = gateway.upload(dir.path(), "a.pdf", None).await.unwrap_err();
        assert!(matches!(err, StorageError::LocalInput(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_upload_remote_failure() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        transport.fail("put", 401, r#"{"error":"bad token"}"#);

        let result = gateway.upload_bytes(&b"hello"[..], "a.txt").await;
        let failure = result.failure().unwrap();
        assert_eq!(failure.status_code, Some(401));
        assert_eq!(failure.error, r#"{"error":"bad token"}"#);
        assert_eq!(failure.kind, FailureKind::Remote);
        assert_exclusive(&result.to_json());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_network_failure() {
        let (gateway, transport) = gateway(None);
        transport.go_offline();

        let failure = gateway.upload_bytes(&b"x"[..], "a.txt").await.into_result().unwrap_err();
        assert_eq!(failure.kind, FailureKind::Network);
        assert_eq!(failure.status_code, None);

        let failure = gateway.delete("a.txt").await.into_result().unwrap_err();
        assert_eq!(failure.kind, FailureKind::Network);
        assert!(!gateway.exists("a.txt").await);
    }

    #[tokio::test]
    async fn test_download_creates_directories() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        transport.insert("docs/a.pdf", &b"%PDF-1.7"[..]);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/a.pdf");

        let result = gateway.download("docs/a.pdf", &target).await;
        let downloaded = result.success().unwrap();
        assert_eq!(downloaded.size, 8);
        assert_eq!(downloaded.local_path, target);
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.7");
        assert_exclusive(&result.to_json());
    }

    #[tokio::test]
    async fn test_download_failures_are_classified() {
        let dir = tempfile::tempdir().unwrap();

        // No domain, the signed URL cannot be built
        let (gateway_without_domain, transport) = gateway(None);
        transport.insert("a.pdf", &b"x"[..]);
        let failure = gateway_without_domain
            .download("a.pdf", dir.path().join("a.pdf"))
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::Signature);
        assert!(transport.calls().is_empty());

        // Missing object
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        let result = gateway.download("missing.pdf", dir.path().join("m.pdf")).await;
        let failure = result.failure().unwrap();
        assert_eq!(failure.kind, FailureKind::Network);
        assert_eq!(failure.status_code, Some(404));
        assert!(!dir.path().join("m.pdf").exists());

        // Parent of the target is a regular file
        transport.insert("a.pdf", &b"x"[..]);
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let failure = gateway
            .download("a.pdf", blocker.join("a.pdf"))
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::Path);

        // Transport unreachable
        transport.go_offline();
        let failure = gateway
            .download("a.pdf", dir.path().join("b.pdf"))
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(failure.kind, FailureKind::Network);
        assert_eq!(failure.status_code, None);
    }

    #[tokio::test]
    async fn test_delete_copy_move() {
        let (gateway, transport) = gateway(None);
        transport.insert("a.txt", &b"a"[..]);

        let copied = gateway.copy("a.txt", "b.txt").await.into_result().unwrap();
        assert_eq!(copied.src_key, "a.txt");
        assert_eq!(copied.dest_key, "b.txt");
        assert!(transport.object("a.txt").is_some());
        assert!(transport.object("b.txt").is_some());

        let moved = gateway.move_object("b.txt", "c.txt").await.into_result().unwrap();
        assert_eq!(moved.dest_key, "c.txt");
        assert!(transport.object("b.txt").is_none());
        assert!(transport.object("c.txt").is_some());

        let deleted = gateway.delete("c.txt").await.into_result().unwrap();
        assert_eq!(deleted.key, "c.txt");
        assert!(transport.object("c.txt").is_none());

        for result in [
            gateway.delete("c.txt").await.to_json(),
            gateway.copy("missing", "x").await.to_json(),
            gateway.move_object("missing", "x").await.to_json(),
        ] {
            assert_eq!(result["success"], false);
            assert_eq!(result["status_code"], 612);
            assert_exclusive(&result);
        }
    }

    #[tokio::test]
    async fn test_result_branches_are_exclusive_for_all_statuses() {
        for status in [200u16, 400, 401, 404, 500, 612, 614] {
            let (gateway, transport) = gateway(Some("cdn.example.com"));
            transport.insert("a.txt", &b"a"[..]);
            if status != 200 {
                for op in ["put", "stat", "delete", "copy", "move", "list"] {
                    transport.fail(op, status, "error body");
                }
            }
            let results = [
                gateway.upload_bytes(&b"a"[..], "b.txt").await.to_json(),
                gateway.stat("a.txt").await.to_json(),
                gateway.list("", 10, "").await.to_json(),
                gateway.copy("a.txt", "c.txt").await.to_json(),
                gateway.move_object("c.txt", "d.txt").await.to_json(),
                gateway.delete("a.txt").await.to_json(),
            ];
            for json in &results {
                assert_eq!(json["success"], status == 200, "status {}: {}", status, json);
                assert_exclusive(json);
            }
        }
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let (gateway, transport) = gateway(None);
        for i in 0..150 {
            transport.insert(&format!("docs/{:03}.pdf", i), &b"x"[..]);
        }
        transport.insert("other/skip.pdf", &b"x"[..]);

        let first = gateway.list("docs/", 100, "").await.into_result().unwrap();
        assert!(!first.is_end);
        assert!(!first.marker.is_empty());
        assert_eq!(first.total, 100);
        assert_eq!(first.files.len(), 100);
        assert!(first.files.iter().all(|f| f.url.is_none()));

        let second = gateway.list("docs/", 100, &first.marker).await.into_result().unwrap();
        assert!(second.is_end);
        assert!(second.marker.is_empty());
        assert_eq!(second.total, 50);
        assert_eq!(second.files[0].key, "docs/100.pdf");
        assert!(second.files.iter().all(|f| f.key.starts_with("docs/")));
    }

    #[tokio::test]
    async fn test_list_urls_follow_domain() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        transport.insert("docs/a.pdf", &b"x"[..]);
        let page = gateway.list_with(&ListOptions::default()).await.into_result().unwrap();
        assert_eq!(page.files[0].url.as_deref(), Some("https://cdn.example.com/docs/a.pdf"));
        assert_eq!(page.files[0].size, 1);
    }

    #[tokio::test]
    async fn test_exists_does_not_distinguish_failures() {
        let (gateway, transport) = gateway(None);
        transport.insert("a.txt", &b"a"[..]);
        assert!(gateway.exists("a.txt").await);
        assert!(!gateway.exists("missing.txt").await);

        transport.fail("stat", 404, "not found");
        assert!(!gateway.exists("a.txt").await);

        transport.fail("stat", 500, "internal error");
        assert!(!gateway.exists("a.txt").await);
    }

    #[tokio::test]
    async fn test_stat() {
        let (gateway, transport) = gateway(Some("cdn.example.com"));
        transport.insert("a.txt", &b"hello"[..]);

        let record = gateway.stat("a.txt").await.into_result().unwrap();
        assert_eq!(record.key, "a.txt");
        assert_eq!(record.size, 5);
        assert_eq!(record.mime_type, "application/octet-stream");
        assert_eq!(record.url.as_deref(), Some("https://cdn.example.com/a.txt"));

        let failure = gateway.stat("missing").await.into_result().unwrap_err();
        assert_eq!(failure.status_code, Some(612));
    }

    #[tokio::test]
    async fn test_url_helpers_delegate() {
        let (gateway, _) = gateway(None);
        assert!(matches!(gateway.public_url("a"), Err(StorageError::Configuration(_))));
        assert!(matches!(gateway.private_url("a", None), Err(StorageError::Configuration(_))));
        assert_eq!(gateway.upload_token(None, None).policy().scope, "artifacts");
        assert_eq!(gateway.bucket(), "artifacts");
    }

    #[tokio::test]
    async fn test_concurrent_use_from_tasks() {
        let (gateway, transport) = gateway(None);
        let gateway = Arc::new(gateway);

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let gateway = gateway.clone();
                tokio::spawn(async move { gateway.upload_bytes(vec![i as u8; i + 1], &format!("k/{}", i)).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().is_success());
        }
        assert_eq!(transport.tokens().len(), 16);
    }
}
