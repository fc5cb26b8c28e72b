use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use pulse_core::{CalendarEvent, CalendarSource, Error, Result};

const THIS_WEEK_URL: &str = "https://nfs.faireconomy.media/ff_calendar_thisweek.json";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Weekly economic-calendar feed. The feed covers all countries; currency
/// filtering stays in the pipeline.
pub struct WeeklyCalendarClient {
    client: Client,
    url: String,
}

impl WeeklyCalendarClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            url: THIS_WEEK_URL.to_string(),
        })
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }
}

impl fmt::Debug for WeeklyCalendarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeeklyCalendarClient")
            .field("client", &"<reqwest::Client>")
            .field("url", &self.url)
            .finish()
    }
}

#[async_trait]
impl CalendarSource for WeeklyCalendarClient {
    async fn fetch_this_week(&self) -> Result<Vec<CalendarEvent>> {
        debug!("fetching weekly calendar from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "calendar provider returned {}",
                response.status()
            )));
        }

        response
            .json::<Vec<CalendarEvent>>()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))
    }
}
