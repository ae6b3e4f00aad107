//! OpenAI-compatible client covering the embedding and chat completion calls.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{endpoint, read_json};
use crate::agents::{ChatModel, Embedder};
use crate::error::ServiceError;
use crate::models::ChatMessage;

const SERVICE: &str = "openai";

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
}

impl OpenAiClient {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        embedding_model: impl Into<String>,
        chat_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            embedding_model: embedding_model.into(),
            chat_model: chat_model.into(),
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError> {
        debug!("Embedding query with model {}", self.embedding_model);

        let response = self
            .client
            .post(endpoint(&self.base_url, "/embeddings"))
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.embedding_model,
                input: [text],
            })
            .send()
            .await?;

        let body: EmbeddingResponse = read_json(SERVICE, response).await?;
        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| ServiceError::invalid(SERVICE, "no embedding in response"))
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, ServiceError> {
        debug!(
            "Requesting completion from {} with {} messages",
            self.chat_model,
            messages.len()
        );

        let response = self
            .client
            .post(endpoint(&self.base_url, "/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.chat_model,
                messages,
                temperature,
            })
            .send()
            .await?;

        let body: ChatResponse = read_json(SERVICE, response).await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ServiceError::invalid(SERVICE, "no message content in completion"))
    }
}
