//! In-memory transport for tests / 测试用内存传输

use async_trait::async_trait;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{ListItem, ListOptions, ListRet, ProgressCallback, PutRet, StatRet, StorageTransport, TransportResponse, TransportResult};
use crate::auth::urlsafe_b64;
use crate::error::TransportError;
use crate::token::UploadToken;

const PUT_TIME: i64 = 17_000_000_000_000_000;

#[derive(Default)]
pub(crate) struct MemoryTransport {
    objects: Mutex<BTreeMap<String, Bytes>>,
    calls: Mutex<Vec<String>>,
    forced: Mutex<HashMap<&'static str, (u16, String)>>,
    offline: AtomicBool,
    tokens: Mutex<Vec<UploadToken>>,
}

impl MemoryTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, key: &str, data: impl Into<Bytes>) {
        self.objects.lock().unwrap().insert(key.to_string(), data.into());
    }

    pub(crate) fn object(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Make `op` answer with `status` and `body` / 强制某操作返回指定状态
    pub(crate) fn fail(&self, op: &'static str, status: u16, body: &str) {
        self.forced.lock().unwrap().insert(op, (status, body.to_string()));
    }

    /// Every call fails before reaching the service / 模拟网络不可达
    pub(crate) fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn tokens(&self) -> Vec<UploadToken> {
        self.tokens.lock().unwrap().clone()
    }

    fn hash(data: &[u8]) -> String {
        urlsafe_b64(Sha1::digest(data))
    }

    fn stat_of(key: &str, data: &Bytes) -> ListItem {
        ListItem {
            key: key.to_string(),
            fsize: data.len() as u64,
            hash: Self::hash(data),
            put_time: PUT_TIME,
            mime_type: "application/octet-stream".to_string(),
        }
    }

    fn enter<T>(&self, op: &'static str) -> Option<TransportResult<T>> {
        self.calls.lock().unwrap().push(op.to_string());
        if self.offline.load(Ordering::SeqCst) {
            let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
            return Some(Err(TransportError::Io(err)));
        }
        self.forced
            .lock()
            .unwrap()
            .get(op)
            .map(|(status, body)| Ok(TransportResponse::error(*status, body.clone())))
    }

    fn not_found<T>() -> TransportResult<T> {
        Ok(TransportResponse::error(612, r#"{"error":"no such file or directory"}"#))
    }
}

#[async_trait]
impl StorageTransport for MemoryTransport {
    async fn put(
        &self,
        token: &UploadToken,
        key: &str,
        data: Bytes,
        progress: Option<ProgressCallback>,
    ) -> TransportResult<PutRet> {
        if let Some(forced) = self.enter("put") {
            return forced;
        }
        self.tokens.lock().unwrap().push(token.clone());
        if let Some(progress) = progress {
            progress(data.len() as u64, data.len() as u64);
        }
        let hash = Self::hash(&data);
        self.insert(key, data);
        Ok(TransportResponse::ok(PutRet { hash, key: key.to_string() }))
    }

    async fn stat(&self, _bucket: &str, key: &str) -> TransportResult<StatRet> {
        if let Some(forced) = self.enter("stat") {
            return forced;
        }
        match self.object(key) {
            Some(data) => {
                let item = Self::stat_of(key, &data);
                Ok(TransportResponse::ok(StatRet {
                    fsize: item.fsize,
                    hash: item.hash,
                    put_time: item.put_time,
                    mime_type: item.mime_type,
                }))
            }
            None => Self::not_found(),
        }
    }

    async fn delete(&self, _bucket: &str, key: &str) -> TransportResult<()> {
        if let Some(forced) = self.enter("delete") {
            return forced;
        }
        match self.objects.lock().unwrap().remove(key) {
            Some(_) => Ok(TransportResponse::ok(())),
            None => Self::not_found(),
        }
    }

    async fn copy(&self, _bucket: &str, src_key: &str, dest_key: &str) -> TransportResult<()> {
        if let Some(forced) = self.enter("copy") {
            return forced;
        }
        match self.object(src_key) {
            Some(data) => {
                self.insert(dest_key, data);
                Ok(TransportResponse::ok(()))
            }
            None => Self::not_found(),
        }
    }

    async fn move_object(&self, _bucket: &str, src_key: &str, dest_key: &str) -> TransportResult<()> {
        if let Some(forced) = self.enter("move") {
            return forced;
        }
        let removed = self.objects.lock().unwrap().remove(src_key);
        match removed {
            Some(data) => {
                self.insert(dest_key, data);
                Ok(TransportResponse::ok(()))
            }
            None => Self::not_found(),
        }
    }

    async fn list(&self, _bucket: &str, options: &ListOptions) -> TransportResult<ListRet> {
        if let Some(forced) = self.enter("list") {
            return forced;
        }
        // Marker is the base64 of the last key returned
        let after = if options.marker.is_empty() {
            None
        } else {
            use base64::{engine::general_purpose::URL_SAFE, Engine as _};
            let raw = URL_SAFE.decode(&options.marker).unwrap();
            Some(String::from_utf8(raw).unwrap())
        };

        let objects = self.objects.lock().unwrap();
        let mut matching = objects
            .iter()
            .filter(|(key, _)| key.starts_with(&options.prefix))
            .filter(|(key, _)| after.as_ref().map_or(true, |after| key.as_str() > after.as_str()));

        let items: Vec<ListItem> = matching
            .by_ref()
            .take(options.limit)
            .map(|(key, data)| Self::stat_of(key, data))
            .collect();
        let has_more = matching.next().is_some();

        let marker = match (has_more, items.last()) {
            (true, Some(last)) => urlsafe_b64(&last.key),
            _ => String::new(),
        };
        Ok(TransportResponse::ok(ListRet { marker, items }))
    }

    async fn fetch(&self, url: &str) -> TransportResult<Bytes> {
        if let Some(forced) = self.enter("fetch") {
            return forced;
        }
        if !url.contains("token=") {
            return Ok(TransportResponse::error(401, "unsigned request"));
        }
        let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        let path = rest.split_once('/').map(|(_, path)| path).unwrap_or("");
        let key = path.split('?').next().unwrap_or("");
        match self.object(key) {
            Some(data) => Ok(TransportResponse::ok(data)),
            None => Ok(TransportResponse::error(404, "Document not found")),
        }
    }
}
