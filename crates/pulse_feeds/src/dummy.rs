use async_trait::async_trait;

use pulse_core::{CalendarEvent, CalendarSource, NewsItem, NewsSource, Result};

/// Fixed news items, for tests and key-less local runs.
#[derive(Debug, Clone, Default)]
pub struct StaticNews {
    items: Vec<NewsItem>,
}

impl StaticNews {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self { items }
    }

    pub fn sample() -> Self {
        Self::new(vec![
            NewsItem {
                title: "Fed leaves rates unchanged at 4.25%".to_string(),
                description: "The Federal Reserve held its benchmark rate steady, citing cooling inflation.".to_string(),
            },
            NewsItem {
                title: "Nasdaq closes at record high on chip rally".to_string(),
                description: "Semiconductor stocks lifted the index for a third straight session.".to_string(),
            },
            NewsItem {
                title: "Oil slips below $70 as supply concerns ease".to_string(),
                description: "Crude retreated after inventory data showed a surprise build.".to_string(),
            },
        ])
    }
}

#[async_trait]
impl NewsSource for StaticNews {
    async fn fetch(&self, _category: &str) -> Result<Vec<NewsItem>> {
        Ok(self.items.clone())
    }
}

/// Fixed calendar rows, for tests and key-less local runs.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    events: Vec<CalendarEvent>,
}

impl StaticCalendar {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    pub fn sample() -> Self {
        Self::new(vec![
            CalendarEvent {
                title: "CPI y/y".to_string(),
                country: "USD".to_string(),
                date: "2026-08-11T08:30:00-04:00".to_string(),
                impact: Some("High".to_string()),
                forecast: Some("2.9%".to_string()),
                previous: Some("3.0%".to_string()),
            },
            CalendarEvent {
                title: "ECB Press Conference".to_string(),
                country: "EUR".to_string(),
                date: "2026-08-13T08:45:00-04:00".to_string(),
                impact: Some("High".to_string()),
                forecast: None,
                previous: None,
            },
        ])
    }
}

#[async_trait]
impl CalendarSource for StaticCalendar {
    async fn fetch_this_week(&self) -> Result<Vec<CalendarEvent>> {
        Ok(self.events.clone())
    }
}
