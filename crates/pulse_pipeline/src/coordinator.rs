use std::sync::Arc;

use tracing::{info, warn};

use pulse_core::{market_now, Error, LastPublishResult, PublishOutcome, Publisher};
use pulse_storage::ArticleStore;

/// Turns text into one external post attempt and records what happened.
///
/// Exactly one `Publisher::post` per call, no retries; a rate-limited
/// attempt lands in the store as a `Failure`, never as a fabricated success.
pub struct PublishCoordinator {
    publisher: Arc<dyn Publisher>,
    store: Arc<ArticleStore>,
}

impl PublishCoordinator {
    pub fn new(publisher: Arc<dyn Publisher>, store: Arc<ArticleStore>) -> Self {
        Self { publisher, store }
    }

    pub async fn publish(&self, text: &str) -> PublishOutcome {
        match self.publisher.post(text).await {
            Ok(receipt) => {
                let timestamp = market_now();
                info!("📤 Post accepted: {}", receipt.url);
                self.store
                    .record_publish(LastPublishResult::Success {
                        id: receipt.id.clone(),
                        text: text.to_string(),
                        url: receipt.url.clone(),
                        timestamp,
                    })
                    .await;
                PublishOutcome::Success {
                    id: receipt.id,
                    url: receipt.url,
                    text: text.to_string(),
                    timestamp,
                }
            }
            Err(Error::RateLimited) => {
                warn!("🚦 Publisher rate limit hit, skipping this post");
                self.store
                    .record_publish(LastPublishResult::Failure {
                        reason: "publisher rate limit hit".to_string(),
                        timestamp: market_now(),
                    })
                    .await;
                PublishOutcome::RateLimited
            }
            Err(e) => {
                let message = e.to_string();
                warn!("📪 Publish failed: {}", message);
                self.store
                    .record_publish(LastPublishResult::Failure {
                        reason: message.clone(),
                        timestamp: market_now(),
                    })
                    .await;
                PublishOutcome::Failed { message }
            }
        }
    }
}
