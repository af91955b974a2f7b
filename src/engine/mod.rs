// src/engine/mod.rs
//! Network engine boundary
//!
//! The underlying engine (the pluggable transport that actually intercepts
//! and serves HTTP(S) requests) is a black box to this crate. This module
//! pins down the exact surface the interception layer needs from it:
//!
//! - **Feature toggles**: HTTP/2, QUIC, compression, metrics
//! - **Cache type**: disabled, disk-backed, or memory-backed
//! - **Identity**: user-agent string with partial-override semantics
//! - **Experimental options**: opaque serialized payload, engine-validated
//! - **Lifecycle**: start once, register as the active URL transport
//! - **Hooks**: per-request admission predicate, per-request completion relay
//!
//! Everything network-shaped (connection management, TLS, retries, protocol
//! negotiation) lives behind this trait and is explicitly not this crate's
//! concern.

#[cfg(test)]
pub mod mock;

use crate::interception::host_filter::AdmissionPredicate;
use crate::interception::relay::CompletionRelay;
use crate::utils::errors::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Independently togglable engine features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineFeature {
    /// HTTP/2 support
    Http2,

    /// QUIC support
    Quic,

    /// Brotli/gzip response compression
    Compression,

    /// Engine-internal request metrics collection
    Metrics,
}

/// Engine-level cache types
///
/// Distinct from [`CacheMode`](crate::utils::config::CacheMode) on purpose:
/// the configuration enum is this crate's surface, this one is the engine's,
/// and the controller owns the mapping between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineCacheType {
    /// No response caching
    Disabled,

    /// Disk-backed response cache
    DiskBacked,

    /// In-memory response cache
    MemoryBacked,
}

/// Terminal status of a finished request
///
/// Success, failure, and cancellation all count as "finished"; the engine
/// reports which, and this layer never acts on the distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    Succeeded,
    Failed,
    Canceled,
}

/// Completion record produced by the engine for every finished request
///
/// Treated as an opaque pass-through payload by the relay: the `metrics`
/// value is engine-internal timing/transfer data and is never parsed or
/// mutated on the way to the application listener.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRecord {
    /// URL of the terminating request
    pub url: String,

    /// How the request finished
    pub outcome: RequestOutcome,

    /// When the engine considered the request finished
    pub finished_at: DateTime<Utc>,

    /// Engine-internal timing and transfer metrics, schema-free
    pub metrics: serde_json::Value,
}

/// The surface this layer requires from a pluggable network engine
///
/// Implementations are expected to dispatch both the admission predicate and
/// the completion relay from their own internal threads, potentially many at
/// once; everything handed to the engine through this trait is `Send + Sync`.
///
/// The engine holds the predicate and relay only for dispatch; it must not
/// outlive their registration.
pub trait NetworkEngine: Send + Sync {
    /// Toggle an engine feature
    fn set_feature(&self, feature: EngineFeature, enabled: bool);

    /// Select the response cache type
    fn set_cache_type(&self, cache: EngineCacheType);

    /// Set the user-agent identity
    ///
    /// `partial` requests an additive override: the engine appends to rather
    /// than replaces its platform default.
    fn set_user_agent(&self, user_agent: &str, partial: bool);

    /// Forward an opaque experimental-options payload
    ///
    /// The engine validates the payload; a rejection surfaces as
    /// [`EngineError::ConfigRejected`](crate::utils::errors::EngineError).
    fn set_experimental_options(&self, options: &str) -> Result<()>;

    /// Start the engine
    ///
    /// Synchronous from the caller's perspective. Fails if the engine was
    /// already started externally.
    fn start(&self) -> Result<()>;

    /// Install the engine as the platform's active URL-handling transport
    fn register_as_active_transport(&self);

    /// Install the per-request admission gate
    ///
    /// Called by the engine for every outgoing request to decide whether the
    /// request is routed through the engine or the default transport.
    fn set_admission_predicate(&self, predicate: Arc<dyn AdmissionPredicate>);

    /// Install the completion relay
    ///
    /// Invoked by the engine exactly once per finished request.
    fn set_completion_listener(&self, relay: CompletionRelay);
}
