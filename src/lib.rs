// src/lib.rs
//! Netshunt
//!
//! Interception configuration and host-filtering layer for a pluggable
//! network engine. The engine can intercept HTTP(S) traffic for a subset of
//! destination hosts while all other traffic stays on the platform's default
//! transport; this crate owns the decision layer around it:
//!
//! - **interception**: start-once controller, admission predicate, relay
//! - **engine**: the trait boundary a concrete engine implements
//! - **observability**: tracing and metrics initialization
//! - **utils**: configuration and error types
//!
//! # Usage
//!
//! ```no_run
//! use netshunt::{EngineConfig, InterceptionController};
//! use std::sync::Arc;
//!
//! # fn engine() -> Arc<dyn netshunt::engine::NetworkEngine> { unimplemented!() }
//! let controller = InterceptionController::new(engine());
//! controller.start(
//!     EngineConfig::new().with_allow_list(["googleapis.com"]),
//! );
//! assert!(controller.is_active());
//! ```
//!
//! Startup is idempotent and best-effort: exactly one configuration is ever
//! applied per process lifetime, and engine-side rejections are logged rather
//! than propagated. There is no teardown or restart path.

// Public module exports
pub mod engine;
pub mod interception;
pub mod observability;
pub mod utils;

// Re-export commonly used types
pub use engine::{CompletionRecord, NetworkEngine, RequestOutcome};
pub use interception::{
    AdmissionPredicate, AllowListFilter, CompletionListener, CompletionRelay,
    ExecutionContext, InterceptionController, TokioContext,
};
pub use utils::config::{CacheMode, EngineConfig};
pub use utils::errors::{EngineError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
