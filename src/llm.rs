use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GroqConfig;
use crate::error::{AppError, Result};
use crate::model::ChatModel;

/// Turns article text into a summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, model: ChatModel) -> Result<String>;
}

pub fn build_prompt(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 64);
    result.push_str("Write a summary of the following in 250-300 words:\n\n");
    result.push_str(text);
    result.push_str("\n\n");
    result
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    config: GroqConfig,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Self {
        GroqClient {
            client: Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }
}

#[async_trait]
impl Summarizer for GroqClient {
    async fn summarize(&self, text: &str, model: ChatModel) -> Result<String> {
        let prompt = build_prompt(text);
        debug!(model = %model, prompt_chars = prompt.len(), "calling completion API");

        let body = ChatRequest {
            model: model.id(),
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.0,
        };

        let res = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmError(format!("Request to completion API failed: {}", e)))?;

        let status = res.status();
        let raw = res
            .text()
            .await
            .map_err(|e| AppError::LlmError(format!("Failed to read completion response: {}", e)))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&raw)
                .map(|envelope| envelope.error.message)
                .unwrap_or(raw);
            return Err(AppError::LlmError(format!("{} - {}", status, detail)));
        }

        let reply = serde_json::from_str::<ChatResponse>(&raw)
            .ok()
            .and_then(|parsed| parsed.choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_wraps_text_verbatim() {
        assert_eq!(
            build_prompt("Paragraph one.\n\nParagraph two."),
            "Write a summary of the following in 250-300 words:\n\nParagraph one.\n\nParagraph two.\n\n"
        );
        assert_eq!(build_prompt(""), "Write a summary of the following in 250-300 words:\n\n\n\n");
    }

    #[test]
    fn request_body_pins_temperature_to_zero() {
        let body = ChatRequest {
            model: ChatModel::Llama31_8bInstant.id(),
            messages: vec![Message { role: "user", content: "hi" }],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn completions_url_joins_the_base() {
        let config = GroqConfig::from_parts(Some("k".into()), Some("http://127.0.0.1:1/v1".into())).unwrap();
        assert_eq!(GroqClient::new(config).completions_url(), "http://127.0.0.1:1/v1/chat/completions");
    }
}
