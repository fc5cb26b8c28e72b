//! In-memory shared state: the bounded article history, the last-publish
//! slot and the upcoming-events slot.
//!
//! This is the only mutable state shared between the scheduler's handler
//! tasks and the request-serving context. Every operation takes the single
//! lock, so admits, snapshots and slot updates are linearizable with respect
//! to each other; an evict-plus-append is never observable half done.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::RwLock;

use pulse_core::{CalendarEvent, LastPublishResult, StructuredArticle};

/// How many articles of history the store keeps.
pub const DEFAULT_CAPACITY: usize = 5;

struct Inner {
    articles: VecDeque<StructuredArticle>,
    last_publish: Option<LastPublishResult>,
    upcoming_events: Vec<CalendarEvent>,
}

pub struct ArticleStore {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                articles: VecDeque::with_capacity(capacity),
                last_publish: None,
                upcoming_events: Vec::new(),
            })),
            capacity: capacity.max(1),
        }
    }

    /// Append an article, evicting the oldest entry first when full.
    pub async fn admit(&self, article: StructuredArticle) {
        let mut inner = self.inner.write().await;
        if inner.articles.len() == self.capacity {
            inner.articles.pop_front();
        }
        inner.articles.push_back(article);
    }

    /// Cloned copy of the buffer, oldest first, reflecting some
    /// admit-serialized state.
    pub async fn snapshot(&self) -> Vec<StructuredArticle> {
        let inner = self.inner.read().await;
        inner.articles.iter().cloned().collect()
    }

    pub async fn record_publish(&self, result: LastPublishResult) {
        let mut inner = self.inner.write().await;
        inner.last_publish = Some(result);
    }

    pub async fn last_publish(&self) -> Option<LastPublishResult> {
        let inner = self.inner.read().await;
        inner.last_publish.clone()
    }

    pub async fn record_events(&self, events: Vec<CalendarEvent>) {
        let mut inner = self.inner.write().await;
        inner.upcoming_events = events;
    }

    pub async fn upcoming_events(&self) -> Vec<CalendarEvent> {
        let inner = self.inner.read().await;
        inner.upcoming_events.clone()
    }
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}
