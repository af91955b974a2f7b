// src/interception/mod.rs
//! Interception configuration and host-filtering layer
//!
//! This module drives a pluggable network engine that intercepts HTTP(S)
//! traffic for a subset of destination hosts, leaving everything else to the
//! platform's default transport:
//!
//! - **Controller**: one-shot startup sequence applying the configuration and
//!   installing the engine as the active transport
//! - **Host Filter**: per-request admission predicate over the allow-list
//! - **Relay**: forwards engine completion records to application listeners
//!
//! # Architecture
//!
//! ```text
//! EngineConfig ──▶ InterceptionController ──▶ engine        (once, at start)
//!
//! engine ──▶ AllowListFilter::admit(host) ──▶ engine        (per request)
//!                 │
//!                 └─ true: engine transport / false: default transport
//!
//! engine ──▶ CompletionRelay ──▶ application listener       (per completion)
//! ```
//!
//! HTTP semantics (redirects, caching correctness, TLS validation) belong to
//! the engine. This layer only decides admission and forwards completion
//! metadata; it never inspects request bodies or negotiates protocols.

pub mod controller;
pub mod host_filter;
pub mod relay;

// Re-export commonly used types
pub use controller::InterceptionController;
pub use host_filter::{AdmissionPredicate, AllowListFilter};
pub use relay::{CompletionListener, CompletionRelay, ExecutionContext, TokioContext};
