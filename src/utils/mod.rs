// src/utils/mod.rs
//! Common utilities: configuration and error types

pub mod config;
pub mod errors;

pub use config::{CacheMode, EngineConfig};
pub use errors::{EngineError, Result};
