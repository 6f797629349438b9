use std::env;

/// Connection settings for the xAI chat-completions API.
#[derive(Clone, Debug)]
pub struct XaiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub llm_provider: String,
    pub xai: XaiConfig,
    pub ollama: OllamaConfig,
    /// Remote events listing; when unset the SQLite catalog at `database_url` is used.
    pub catalog_url: Option<String>,
    pub database_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7001),
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "xai".to_string()),
            xai: XaiConfig {
                api_key: env::var("XAI_API_KEY").unwrap_or_default(),
                model: env::var("XAI_MODEL").unwrap_or_else(|_| "grok-4-latest".to_string()),
                base_url: env::var("XAI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.x.ai/v1".to_string()),
            },
            ollama: OllamaConfig {
                url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            },
            catalog_url: env::var("CATALOG_URL").ok().filter(|v| !v.is_empty()),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "tigertix.db".to_string()),
        }
    }
}
