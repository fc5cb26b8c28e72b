use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier strategy for articles. Injected so tests get stable ids and
/// production gets collision-free ones.
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 ids.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdProvider for UuidIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Monotonic counter ids, stable within a process.
#[derive(Debug, Default)]
pub struct SequentialIds(AtomicU64);

impl IdProvider for SequentialIds {
    fn next_id(&self) -> String {
        self.0.fetch_add(1, Ordering::Relaxed).to_string()
    }
}
