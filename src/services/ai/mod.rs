pub mod extract;
pub mod intent;
pub mod normalize;
pub mod ollama;
pub mod xai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// A chat backend. Returns the provider's response body untouched; turning it
/// into text is the caller's job (see [`extract::ModelResponse`]).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> anyhow::Result<serde_json::Value>;
}

pub fn build_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, AppError> {
    match config.llm_provider.as_str() {
        "ollama" => {
            tracing::info!(url = %config.ollama.url, model = %config.ollama.model, "using Ollama LLM provider");
            Ok(Box::new(ollama::OllamaProvider::new(config.ollama.clone())))
        }
        "xai" => {
            if config.xai.api_key.is_empty() {
                return Err(AppError::Config(
                    "XAI_API_KEY must be set when LLM_PROVIDER=xai".to_string(),
                ));
            }
            tracing::info!(model = %config.xai.model, "using xAI LLM provider");
            Ok(Box::new(xai::XaiProvider::new(config.xai.clone())))
        }
        other => Err(AppError::Config(format!("unknown LLM_PROVIDER: {other}"))),
    }
}
