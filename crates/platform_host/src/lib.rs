//! Typed host-domain contracts and shared models for the bigbox client.
//!
//! This crate is the API-first boundary for platform services. It exposes the identity and
//! file-store service traits, their shared models and error type, and in-memory implementations
//! used by tests, while concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod files;
pub mod host;
pub mod identity;

pub use config::{FirebaseConfig, SiteConfig};
pub use error::ServiceError;
pub use files::service::{FileStoreCall, FileStoreFuture, FileStoreService, MemoryFileStore};
pub use files::types::{
    file_path, files_path, login_path, FileRecord, LoginMergeRequest, UploadFile, UploadSource,
    DEFAULT_PAGE_SIZE, UPLOAD_FORM_FIELD,
};
pub use host::HostServices;
pub use identity::service::{
    IdentityCall, IdentityFuture, IdentityListener, IdentityService, MemoryIdentityService,
};
pub use identity::types::Identity;
