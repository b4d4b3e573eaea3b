//! Object storage bucket client / 对象存储客户端
//!
//! Upload tokens and signed URLs are derived locally from the credentials;
//! every remote call goes through a [`StorageTransport`] and comes back as an
//! [`OperationResult`].

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod result;
pub mod signer;
pub mod token;
pub mod transport;

pub use auth::Credentials;
pub use config::StorageConfig;
pub use error::{StorageError, StorageResult, TransportError};
pub use gateway::StorageGateway;
pub use result::{
    Deleted, Downloaded, FailureKind, FileRecord, ListPage, OperationFailure, OperationResult, Transferred, Uploaded,
};
pub use signer::UrlSigner;
pub use token::{TokenIssuer, UploadPolicy, UploadToken};
pub use transport::{HttpTransport, ListOptions, ProgressCallback, StorageTransport, TransportResponse};
