use async_trait::async_trait;

use crate::types::PostReceipt;
use crate::Result;

#[async_trait]
pub trait Publisher: Send + Sync {
    /// Returns the name of the platform backend
    fn name(&self) -> &str;

    /// Post the text once. Fails with `Error::RateLimited` when throttled,
    /// `Error::Publisher` for anything else.
    async fn post(&self, text: &str) -> Result<PostReceipt>;
}
