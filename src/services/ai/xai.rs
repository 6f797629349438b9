use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{LlmProvider, Message};
use crate::config::XaiConfig;

pub struct XaiProvider {
    config: XaiConfig,
    client: reqwest::Client,
}

impl XaiProvider {
    pub fn new(config: XaiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmProvider for XaiProvider {
    async fn chat(
        &self,
        system_prompt: &str,
        messages: &[Message],
    ) -> anyhow::Result<serde_json::Value> {
        let mut chat_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            chat_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        let body = json!({
            "model": self.config.model,
            "messages": chat_messages,
            "temperature": 0,
            "stream": false,
            "max_tokens": 256,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call xAI API")?;

        let status = resp.status();
        if !status.is_success() {
            let msg = resp.text().await.unwrap_or_default();
            anyhow::bail!("xAI API error ({}): {}", status, msg);
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse xAI response")?;

        tracing::debug!(response = %data, "xAI response");

        Ok(data)
    }
}
