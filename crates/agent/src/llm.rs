use anyhow::Result;
use async_trait::async_trait;

/// Single-shot text completion. No streaming, no function calling; structured
/// output is extracted from the returned text by convention.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
