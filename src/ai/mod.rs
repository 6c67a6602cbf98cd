//! Generation-provider abstraction.
//!
//! One real provider (OpenAI chat completions) plus a deterministic fake so
//! handler and pipeline tests never touch the network.

mod fake;
mod openai;

pub use fake::FakeAi;
pub use openai::OpenAiProvider;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AiConfig;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("provider request failed: {0}")]
    RequestFailed(String),

    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to read provider response: {0}")]
    Parse(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// A text-completion provider. Implementations are stateless and cheap to
/// share behind an `Arc`.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Send a prompt, get the model's raw text back.
    async fn complete(&self, prompt: &str) -> Result<String, AiError>;

    fn model_name(&self) -> &str;
}

pub fn provider_from_config(cfg: &AiConfig) -> Result<Arc<dyn AiProvider>, AiError> {
    if cfg.api_key.is_empty() {
        return Err(AiError::NotConfigured("OPENAI_API_KEY not set".into()));
    }
    Ok(Arc::new(OpenAiProvider::new(
        cfg.api_key.clone(),
        cfg.model.clone(),
        cfg.max_tokens,
    )))
}
