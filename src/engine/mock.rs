// src/engine/mock.rs
//! Recording mock engine for unit tests
//!
//! Captures every call made through the [`NetworkEngine`] trait in order, so
//! controller tests can assert exactly what was applied and drive the
//! captured predicate and relay by hand.

use super::{EngineCacheType, EngineFeature, NetworkEngine};
use crate::interception::host_filter::AdmissionPredicate;
use crate::interception::relay::CompletionRelay;
use crate::utils::errors::{EngineError, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    SetFeature(EngineFeature, bool),
    SetCacheType(EngineCacheType),
    SetUserAgent(String, bool),
    SetExperimentalOptions(String),
    Start,
    RegisterAsActiveTransport,
    SetAdmissionPredicate,
    SetCompletionListener,
}

/// Mock engine recording all configuration calls
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    reject_experimental_options: bool,
    fail_start: bool,
    predicate: Mutex<Option<Arc<dyn AdmissionPredicate>>>,
    relay: Mutex<Option<CompletionRelay>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any experimental-options payload
    pub fn rejecting_experimental_options() -> Self {
        Self {
            reject_experimental_options: true,
            ..Self::default()
        }
    }

    /// Fail the `start()` call (engine already started externally)
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    /// The admission predicate installed by the controller, if any
    pub fn predicate(&self) -> Option<Arc<dyn AdmissionPredicate>> {
        self.predicate.lock().clone()
    }

    /// Take the installed completion relay, if any
    pub fn take_relay(&self) -> Option<CompletionRelay> {
        self.relay.lock().take()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

impl NetworkEngine for MockEngine {
    fn set_feature(&self, feature: EngineFeature, enabled: bool) {
        self.record(EngineCall::SetFeature(feature, enabled));
    }

    fn set_cache_type(&self, cache: EngineCacheType) {
        self.record(EngineCall::SetCacheType(cache));
    }

    fn set_user_agent(&self, user_agent: &str, partial: bool) {
        self.record(EngineCall::SetUserAgent(user_agent.to_string(), partial));
    }

    fn set_experimental_options(&self, options: &str) -> Result<()> {
        if self.reject_experimental_options {
            return Err(EngineError::ConfigRejected(format!(
                "malformed experimental options: {}",
                options
            )));
        }
        self.record(EngineCall::SetExperimentalOptions(options.to_string()));
        Ok(())
    }

    fn start(&self) -> Result<()> {
        if self.fail_start {
            return Err(EngineError::EngineFailure(
                "engine already started".to_string(),
            ));
        }
        self.record(EngineCall::Start);
        Ok(())
    }

    fn register_as_active_transport(&self) {
        self.record(EngineCall::RegisterAsActiveTransport);
    }

    fn set_admission_predicate(&self, predicate: Arc<dyn AdmissionPredicate>) {
        self.record(EngineCall::SetAdmissionPredicate);
        *self.predicate.lock() = Some(predicate);
    }

    fn set_completion_listener(&self, relay: CompletionRelay) {
        self.record(EngineCall::SetCompletionListener);
        *self.relay.lock() = Some(relay);
    }
}
