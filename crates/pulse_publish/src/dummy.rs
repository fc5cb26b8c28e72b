use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use pulse_core::{Error, PostReceipt, Publisher, Result};

/// What the next scripted post attempt should do.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Accept,
    RateLimit,
    Fail(String),
}

/// Scriptable publisher for tests and key-less local runs. Outcomes are
/// consumed in order; an empty script accepts everything. The attempt
/// counter exists so tests can assert the one-post-per-call guarantee.
#[derive(Debug, Default)]
pub struct DummyPublisher {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    attempts: AtomicU64,
    next_id: AtomicU64,
}

impl DummyPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(outcomes: impl IntoIterator<Item = ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            attempts: AtomicU64::new(0),
            next_id: AtomicU64::new(0),
        }
    }

    /// External post attempts made so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for DummyPublisher {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn post(&self, _text: &str) -> Result<PostReceipt> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or(ScriptedOutcome::Accept);

        match outcome {
            ScriptedOutcome::Accept => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
                let url = format!("https://x.com/pulse/status/{}", id);
                Ok(PostReceipt { id, url })
            }
            ScriptedOutcome::RateLimit => Err(Error::RateLimited),
            ScriptedOutcome::Fail(message) => Err(Error::Publisher(message)),
        }
    }
}
