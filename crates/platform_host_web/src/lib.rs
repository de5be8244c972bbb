//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer: Firebase Authentication for identity,
//! `fetch` (through `gloo-net`) for the file-storage backend, and file-input reading for uploads.
//!
//! Bridge bindings are split by domain under `bridge/`:
//! - `bridge::firebase`
//! - `bridge::http`
//! - `bridge::interop` (shared wasm glue)

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
mod bridge;
pub mod files;
pub mod identity;
pub mod picker;

pub use adapters::{build_host_services, file_store_service, host_strategy_name, identity_service};
pub use files::HttpFileStoreService;
pub use identity::FirebaseIdentityService;
pub use picker::selected_files;
