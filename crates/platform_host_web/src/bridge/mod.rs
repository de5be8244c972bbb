//! Browser transport bridges for `platform_host_web` service adapters.
//!
//! Each domain module carries a `wasm32` implementation and a non-wasm fallback that reports
//! [`platform_host::ServiceError::Unsupported`], so the adapters compile and test natively.

pub mod firebase;
pub mod http;
#[cfg(target_arch = "wasm32")]
pub mod interop;
