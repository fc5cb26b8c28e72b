use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use pulse_core::{Result, SummaryKind};

use crate::trigger::Trigger;

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;
type PlainFn = Arc<dyn Fn() -> HandlerFuture + Send + Sync>;
type KindFn = Arc<dyn Fn(SummaryKind) -> HandlerFuture + Send + Sync>;

/// The two handler shapes jobs come in: a plain callable, or a callable
/// taking the digest kind bound at registration. A callable and its result
/// never share a binding; results land in the store.
#[derive(Clone)]
pub enum JobCall {
    Plain(PlainFn),
    WithKind(KindFn, SummaryKind),
}

impl JobCall {
    fn invoke(&self) -> HandlerFuture {
        match self {
            JobCall::Plain(f) => f(),
            JobCall::WithKind(f, kind) => f(*kind),
        }
    }
}

/// One registered job. Built once at startup, never mutated afterwards;
/// run-time state (next due, in-flight) lives in the scheduler.
#[derive(Clone)]
pub struct Job {
    pub id: String,
    pub trigger: Trigger,
    pub coalesce: bool,
    call: JobCall,
}

impl Job {
    pub fn new(
        id: &str,
        trigger: Trigger,
        handler: impl Fn() -> HandlerFuture + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.to_string(),
            trigger,
            coalesce: true,
            call: JobCall::Plain(Arc::new(handler)),
        }
    }

    pub fn with_kind(
        id: &str,
        trigger: Trigger,
        kind: SummaryKind,
        handler: impl Fn(SummaryKind) -> HandlerFuture + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.to_string(),
            trigger,
            coalesce: true,
            call: JobCall::WithKind(Arc::new(handler), kind),
        }
    }

    /// Fire once per missed slot instead of collapsing a backlog.
    pub fn without_coalescing(mut self) -> Self {
        self.coalesce = false;
        self
    }

    pub(crate) fn run(&self) -> HandlerFuture {
        self.call.invoke()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("trigger", &self.trigger)
            .field("coalesce", &self.coalesce)
            .finish()
    }
}
