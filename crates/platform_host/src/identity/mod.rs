//! Identity platform contracts.

pub mod service;
pub mod types;
