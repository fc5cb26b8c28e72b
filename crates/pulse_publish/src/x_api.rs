use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pulse_core::{Error, PostReceipt, Publisher, Result};

const POST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct CreatePost<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Deserialize)]
struct CreatedPost {
    id: String,
}

/// X API v2 post client. One call, one post; throttling surfaces as
/// `Error::RateLimited` and is never retried here.
pub struct XApiClient {
    client: Client,
    bearer_token: String,
    username: String,
    base_url: String,
}

impl XApiClient {
    pub fn new(bearer_token: String, username: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(POST_TIMEOUT)
            .build()
            .map_err(|e| Error::Publisher(e.to_string()))?;
        Ok(Self {
            client,
            bearer_token,
            username,
            base_url: "https://api.x.com/2".to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn permalink(&self, id: &str) -> String {
        format!("https://x.com/{}/status/{}", self.username, id)
    }
}

impl fmt::Debug for XApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XApiClient")
            .field("client", &"<reqwest::Client>")
            .field("bearer_token", &"<redacted>")
            .field("username", &self.username)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl Publisher for XApiClient {
    fn name(&self) -> &str {
        "X"
    }

    async fn post(&self, text: &str) -> Result<PostReceipt> {
        debug!("posting {} characters as @{}", text.len(), self.username);
        let response = self
            .client
            .post(format!("{}/tweets", self.base_url))
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .json(&CreatePost { text })
            .send()
            .await
            .map_err(|e| Error::Publisher(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !response.status().is_success() {
            return Err(Error::Publisher(format!(
                "platform returned {}",
                response.status()
            )));
        }

        let payload: CreatePostResponse = response
            .json()
            .await
            .map_err(|e| Error::Publisher(e.to_string()))?;

        let url = self.permalink(&payload.data.id);
        Ok(PostReceipt {
            id: payload.data.id,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permalink_uses_the_configured_username() {
        let client = XApiClient::new("token".to_string(), "equibrief".to_string()).unwrap();
        assert_eq!(
            client.permalink("1881"),
            "https://x.com/equibrief/status/1881"
        );
    }

    #[test]
    fn create_post_response_carries_the_id() {
        let payload: CreatePostResponse =
            serde_json::from_str(r#"{"data": {"id": "1881", "text": "digest"}}"#).unwrap();
        assert_eq!(payload.data.id, "1881");
    }

    #[test]
    fn debug_redacts_the_token() {
        let client = XApiClient::new("secret-token".to_string(), "equibrief".to_string()).unwrap();
        assert!(!format!("{:?}", client).contains("secret-token"));
    }
}
