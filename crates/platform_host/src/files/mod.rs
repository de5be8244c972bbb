//! File-store contracts.

pub mod service;
pub mod types;
