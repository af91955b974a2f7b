// src/interception/controller.rs
//! Interception controller
//!
//! Owns the one-shot startup sequence: consume a configuration exactly once,
//! apply it to the engine, install the engine as the active transport, and
//! install the host filter as the per-request admission gate.
//!
//! The underlying engine can only be initialized once per process, so the
//! controller is a two-state machine (`NotStarted` → `Started`) with no reset
//! path. It is an injectable service rather than a bare global: production
//! code holds one for the process lifetime, tests construct a fresh one per
//! run with a mock engine.

use crate::engine::{EngineCacheType, EngineFeature, NetworkEngine};
use crate::interception::host_filter::AllowListFilter;
use crate::interception::relay::{CompletionListener, CompletionRelay, ExecutionContext};
use crate::utils::config::{CacheMode, EngineConfig};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifecycleState {
    NotStarted,
    Started,
}

/// One-shot interception lifecycle service
///
/// The `state` mutex is the only shared mutable state in this crate; it
/// guards against racing initialization paths (platform lifecycle callbacks
/// can legitimately call `start` concurrently).
pub struct InterceptionController {
    engine: Arc<dyn NetworkEngine>,
    state: Mutex<LifecycleState>,
}

impl InterceptionController {
    /// Create a controller driving `engine`
    pub fn new(engine: Arc<dyn NetworkEngine>) -> Self {
        Self {
            engine,
            state: Mutex::new(LifecycleState::NotStarted),
        }
    }

    /// Apply `config` and activate interception
    ///
    /// Idempotent: the first call wins, every later call (any configuration)
    /// returns immediately. Best-effort by contract: engine-side rejections
    /// are logged and skipped, never propagated, and startup must not take
    /// the host process down.
    pub fn start(&self, config: EngineConfig) {
        let mut state = self.state.lock();
        if *state == LifecycleState::Started {
            debug!("interception already started; ignoring start()");
            return;
        }
        *state = LifecycleState::Started;

        info!(user_agent = %config.user_agent, cache_mode = ?config.cache_mode,
              "starting interception engine");
        self.apply(&config);
    }

    /// Whether interception has been started
    pub fn is_active(&self) -> bool {
        *self.state.lock() == LifecycleState::Started
    }

    /// Register an application completion listener with the engine
    ///
    /// With no `context`, callbacks run on the engine's own dispatch threads.
    pub fn register_completion_listener(
        &self,
        listener: Arc<dyn CompletionListener>,
        context: Option<Arc<dyn ExecutionContext>>,
    ) {
        let mut relay = CompletionRelay::new(listener);
        if let Some(context) = context {
            relay = relay.with_context(context);
        }
        self.engine.set_completion_listener(relay);
    }

    fn apply(&self, config: &EngineConfig) {
        self.engine
            .set_feature(EngineFeature::Http2, config.http2_enabled);
        self.engine
            .set_feature(EngineFeature::Quic, config.quic_enabled);
        self.engine
            .set_feature(EngineFeature::Compression, config.compression_enabled);
        self.engine
            .set_feature(EngineFeature::Metrics, config.metrics_enabled);

        self.engine.set_cache_type(map_cache_mode(config.cache_mode));

        // Partial override: the engine appends to its platform default
        // instead of replacing it.
        self.engine.set_user_agent(&config.user_agent, true);

        if let Some(options) = config.experimental_options.as_deref() {
            if !options.is_empty() {
                if let Err(e) = self.engine.set_experimental_options(options) {
                    warn!(error = %e, "engine rejected experimental options; continuing");
                }
            }
        }

        if let Err(e) = self.engine.start() {
            warn!(error = %e, "engine start failed; continuing");
        }

        self.engine.register_as_active_transport();

        let filter = AllowListFilter::from_allow_list(config.host_allow_list.as_deref());
        info!(allow_list_entries = filter.len(), "installing admission predicate");
        self.engine.set_admission_predicate(Arc::new(filter));
    }
}

/// Map the configuration cache mode onto the engine's cache type
///
/// Ordinal and injective; stable across the engine boundary.
fn map_cache_mode(mode: CacheMode) -> EngineCacheType {
    match mode {
        CacheMode::Disabled => EngineCacheType::Disabled,
        CacheMode::Disk => EngineCacheType::DiskBacked,
        CacheMode::Memory => EngineCacheType::MemoryBacked,
    }
}
