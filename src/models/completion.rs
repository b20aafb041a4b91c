use serde::{Deserialize, Serialize};

/// Sampling settings for a single completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl CompletionOptions {
    pub const fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
        }
    }
}

// ============================================================================
// OpenAI Chat Completions API Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Single-turn request carrying one user prompt
    pub fn user_prompt(model: &str, prompt: &str, options: CompletionOptions) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: options.temperature,
            max_tokens: options.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Trimmed text of the first choice
    ///
    /// `None` when the response has no choices; a choice without content yields "".
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().map(|choice| {
            choice
                .message
                .content
                .map(|c| c.trim().to_string())
                .unwrap_or_default()
        })
    }
}
