// src/interception/relay.rs
//! Completion relay
//!
//! Adapter between the engine's native "request finished" notification and an
//! application-supplied listener. The relay forwards each completion record
//! exactly once and unmodified: no buffering, no reordering, no
//! deduplication. Records for concurrently finishing requests arrive in
//! whatever order the engine delivers them.
//!
//! Dispatch context: when the registration carries an execution context the
//! callback runs there; otherwise it runs inline on whatever thread the
//! engine delivers completions from, which is not necessarily the request
//! thread and not necessarily the host process's main thread. Callers that
//! need a particular thread supply a context.

use crate::engine::CompletionRecord;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// Application-side completion listener
///
/// Receives every finished request's record, success and failure alike. May
/// be invoked concurrently for distinct requests.
pub trait CompletionListener: Send + Sync {
    /// Called once per finished request
    fn on_request_finished(&self, record: Arc<CompletionRecord>);
}

/// Execution context for listener callbacks
///
/// Abstracts "run this somewhere": a thread pool, an async runtime, a test
/// harness. `dispatch` must not block the calling (engine) thread.
pub trait ExecutionContext: Send + Sync {
    /// Run `task` on this context
    fn dispatch(&self, task: Box<dyn FnOnce() + Send>);
}

/// Execution context backed by a tokio runtime
pub struct TokioContext {
    handle: tokio::runtime::Handle,
}

impl TokioContext {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Context for the current tokio runtime
    ///
    /// Panics outside a runtime, same as [`tokio::runtime::Handle::current`].
    pub fn current() -> Self {
        Self::new(tokio::runtime::Handle::current())
    }
}

impl ExecutionContext for TokioContext {
    fn dispatch(&self, task: Box<dyn FnOnce() + Send>) {
        self.handle.spawn(async move { task() });
    }
}

/// Pairs a listener with its execution context; handed to the engine for
/// per-request dispatch
///
/// The relay holds no per-request state: each invocation is independent, and
/// concurrent invocations are expected.
pub struct CompletionRelay {
    listener: Arc<dyn CompletionListener>,
    context: Option<Arc<dyn ExecutionContext>>,
}

impl CompletionRelay {
    /// Relay delivering on the engine's own dispatch context
    pub fn new(listener: Arc<dyn CompletionListener>) -> Self {
        Self {
            listener,
            context: None,
        }
    }

    /// Deliver callbacks on an explicit execution context instead
    pub fn with_context(mut self, context: Arc<dyn ExecutionContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Forward one completion record to the listener
    ///
    /// Called by the engine once per finished request. A panicking listener
    /// is contained here: the engine's internals never see the unwind.
    pub fn on_request_finished(&self, record: Arc<CompletionRecord>) {
        metrics::counter!("netshunt_completions_relayed_total").increment(1);

        let listener = Arc::clone(&self.listener);
        let deliver = move || {
            let result =
                catch_unwind(AssertUnwindSafe(|| listener.on_request_finished(record)));
            if result.is_err() {
                error!("completion listener panicked; record dropped");
            }
        };

        match &self.context {
            Some(context) => context.dispatch(Box::new(deliver)),
            None => deliver(),
        }
    }
}
