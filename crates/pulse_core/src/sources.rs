use async_trait::async_trait;

use crate::types::{CalendarEvent, NewsItem};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch recent items for a provider category, newest first.
    async fn fetch(&self, category: &str) -> Result<Vec<NewsItem>>;
}

#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch this week's economic calendar, all countries.
    async fn fetch_this_week(&self) -> Result<Vec<CalendarEvent>>;
}
