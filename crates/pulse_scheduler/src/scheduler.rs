use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, FixedOffset};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use pulse_core::{market_now, Error, Result};

use crate::job::Job;

const DEFAULT_TICK: Duration = Duration::from_secs(1);

struct RegisteredJob {
    job: Job,
    next_due: Mutex<DateTime<FixedOffset>>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the Running flag when the handler task finishes, even if it
/// panicked.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Timer-driven job runner. Jobs are registered once, then `start` moves the
/// scheduler onto a background task that polls every tick. Handlers run on
/// their own spawned tasks, so jobs never block one another; a job that is
/// due while still running is skipped, not queued.
pub struct Scheduler {
    jobs: Vec<Arc<RegisteredJob>>,
    tick: Duration,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Register a job. Fails on duplicate ids and on triggers that can never
    /// fire; both abort startup.
    pub fn register(&mut self, job: Job) -> Result<()> {
        if self.jobs.iter().any(|j| j.job.id == job.id) {
            return Err(Error::External(anyhow!(
                "job id {} registered twice",
                job.id
            )));
        }
        let next_due = job
            .trigger
            .next_after(market_now())
            .ok_or_else(|| Error::External(anyhow!("job {} can never fire", job.id)))?;

        debug!("job {} registered, first run {}", job.id, next_due);
        self.jobs.push(Arc::new(RegisteredJob {
            job,
            next_due: Mutex::new(next_due),
            in_flight: Arc::new(AtomicBool::new(false)),
        }));
        Ok(())
    }

    pub fn job_ids(&self) -> Vec<String> {
        self.jobs.iter().map(|j| j.job.id.clone()).collect()
    }

    /// Move the scheduler onto its background loop.
    pub fn start(self) -> Result<JoinHandle<()>> {
        if self.jobs.is_empty() {
            return Err(Error::External(anyhow!("no jobs registered")));
        }
        let tick = self.tick;
        Ok(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                self.poll(market_now());
            }
        }))
    }

    /// Evaluate every job against `now`, spawning handlers for due ones.
    /// Returns the spawned handles so tests can await completion; the run
    /// loop drops them.
    pub fn poll(&self, now: DateTime<FixedOffset>) -> Vec<JoinHandle<()>> {
        self.jobs
            .iter()
            .filter_map(|registered| self.poll_job(registered, now))
            .collect()
    }

    fn poll_job(
        &self,
        registered: &Arc<RegisteredJob>,
        now: DateTime<FixedOffset>,
    ) -> Option<JoinHandle<()>> {
        {
            let mut due = registered.next_due.lock().expect("next_due lock poisoned");
            if *due > now {
                return None;
            }

            // Advance before firing. A coalescing job jumps past every
            // missed slot in one step; a non-coalescing one steps through
            // the backlog slot by slot.
            let anchor = if registered.job.coalesce { now } else { *due };
            match registered.job.trigger.next_after(anchor) {
                Some(next) => *due = next,
                None => {
                    error!("job {} has no further due time", registered.job.id);
                    return None;
                }
            }
        }

        if registered.in_flight.swap(true, Ordering::SeqCst) {
            warn!(
                "job {} still running, skipping this firing",
                registered.job.id
            );
            return None;
        }

        let registered = registered.clone();
        Some(tokio::spawn(async move {
            let _guard = InFlightGuard(registered.in_flight.clone());
            debug!("job {} firing", registered.job.id);
            if let Err(e) = registered.job.run().await {
                error!("{}", e.in_job(&registered.job.id));
            }
        }))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
