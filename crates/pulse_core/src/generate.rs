use async_trait::async_trait;

use crate::types::GenerationOptions;
use crate::Result;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the name of the generation backend
    fn name(&self) -> &str;

    /// Generate a block of text for the given prompt
    async fn generate(&self, prompt: &str, opts: &GenerationOptions) -> Result<String>;
}
