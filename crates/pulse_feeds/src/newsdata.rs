use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use pulse_core::{Error, NewsItem, NewsSource, Result};

/// Keyword filter applied on top of the provider category; "business" alone
/// is too broad for a markets digest.
const FINANCE_QUERY: &str =
    "stocks OR stock market OR finance OR investing OR NASDAQ OR S&P OR Dow Jones";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<RawItem>,
}

#[derive(Deserialize)]
struct RawItem {
    title: Option<String>,
    description: Option<String>,
}

/// newsdata.io client.
pub struct NewsDataClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsDataClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            base_url: "https://newsdata.io/api/1".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for NewsDataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsDataClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsDataClient {
    async fn fetch(&self, category: &str) -> Result<Vec<NewsItem>> {
        debug!("fetching {} news from {}", category, self.base_url);
        let mut url = Url::parse(&format!("{}/news", self.base_url))
            .map_err(|e| Error::Fetch(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("language", "en")
            .append_pair("category", category)
            .append_pair("q", FINANCE_QUERY);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!(
                "news provider returned {}",
                response.status()
            )));
        }

        let payload: NewsResponse = response
            .json()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        Ok(payload
            .results
            .into_iter()
            .filter_map(|item| {
                item.title.map(|title| NewsItem {
                    title,
                    description: item.description.unwrap_or_default(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_payload_maps_to_news_items() {
        let payload = r#"{
            "status": "success",
            "totalResults": 3,
            "results": [
                {"title": "Fed holds rates", "description": "The central bank kept rates flat."},
                {"title": "Nasdaq rallies", "description": null},
                {"title": null, "description": "orphan description"}
            ]
        }"#;

        let parsed: NewsResponse = serde_json::from_str(payload).unwrap();
        let items: Vec<NewsItem> = parsed
            .results
            .into_iter()
            .filter_map(|item| {
                item.title.map(|title| NewsItem {
                    title,
                    description: item.description.unwrap_or_default(),
                })
            })
            .collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Fed holds rates");
        assert_eq!(items[1].description, "");
    }

    #[test]
    fn missing_results_field_is_empty_not_error() {
        let parsed: NewsResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let client = NewsDataClient::new("secret-key".to_string()).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("redacted"));
    }
}
