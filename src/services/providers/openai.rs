//! OpenAI chat completions provider

use crate::{
    error::{AppError, AppResult},
    models::{ChatRequest, ChatResponse, CompletionOptions},
    services::providers::{ensure_success, CompletionProvider},
};
use reqwest::Client as HttpClient;
use std::time::Instant;

const PROVIDER: &str = "openai";

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url,
            model,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str, options: CompletionOptions) -> AppResult<String> {
        let start = Instant::now();
        let request = ChatRequest::user_prompt(&self.model, prompt, options);

        let response = self
            .http_client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response = ensure_success(response, PROVIDER).await?;
        let chat_response: ChatResponse = response.json().await?;

        let content = chat_response
            .first_content()
            .ok_or_else(|| AppError::ExternalApi("No response from OpenAI".to_string()))?;

        tracing::debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis() as u64,
            chars = content.len(),
            provider = PROVIDER,
            "Chat completion"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url() {
        let provider = OpenAiProvider::new(
            reqwest::Client::new(),
            "sk-test".to_string(),
            "https://api.openai.com/v1/".to_string(),
            "gpt-4o-mini".to_string(),
        );
        assert_eq!(
            provider.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(provider.name(), "openai");
    }
}
