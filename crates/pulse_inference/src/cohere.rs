use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pulse_core::{Error, GenerationOptions, Result, TextGenerator};

const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    text: String,
}

/// Cohere chat client.
pub struct CohereClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl CohereClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .map_err(|e| Error::Generation(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            model: "command-r-plus".to_string(),
            base_url: "https://api.cohere.ai/v1".to_string(),
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for CohereClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CohereClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for CohereClient {
    fn name(&self) -> &str {
        "Cohere"
    }

    async fn generate(&self, prompt: &str, opts: &GenerationOptions) -> Result<String> {
        debug!(
            "requesting {} tokens from {} at temperature {}",
            opts.max_tokens, self.model, opts.temperature
        );
        let request = ChatRequest {
            model: &self.model,
            message: prompt,
            temperature: opts.temperature,
            max_tokens: opts.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Generation(format!(
                "generation provider returned {}",
                response.status()
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        Ok(payload.text.trim().to_string())
    }
}
