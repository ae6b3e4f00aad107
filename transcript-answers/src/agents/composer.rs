// Composer Agent: grounded answer generation with appended video citations

use std::sync::Arc;

use tracing::{error, info};

use super::citations::sources_block;
use super::policy::should_attach_sources;
use super::ChatModel;
use crate::exchange_log::ExchangeLog;
use crate::metrics;
use crate::models::{ChatMessage, CitationEntry, DEFAULT_TEMPERATURE};

pub const GENERATION_ERROR: &str =
    "Sorry, I couldn't process your request... (Backend Error - LLM)";

pub const SYSTEM_PROMPT: &str = r#"You are an Islamic Assistant that answers questions based on the teachings of Shaykh Dr. Yasir Qadhi.

Guidelines:
• You will receive a user's question and a related context (transcripts from Shaykh Yasir Qadhi's videos).
• Summarize the relevant parts of the transcript into a clear, human-readable answer in Markdown format.
• If the context clearly does not contain any relevant information, respond only with:
"Allah and His Messenger know best (I couldn't find the answer in Shaykh Yasir Qadhi's videos)."
• Be concise, respectful, and accurate in your responses.
• You may respond to general messages such as greetings.
- If the user says "hi", "hello", or similar, greet them with:
    "Assalamualaikum Warahmatullahi Wabaraktuh
    How are you doing today? What questions answer for you?"
- For Islamic greetings, respond with:
    "Wailikum Assalam Warahmatullahi Wabarakatuh"
• If asked who created you, respond with:
"That's not important — what truly matters is who created us all: Allah (SWT).""#;

pub struct ComposerAgent {
    chat: Arc<dyn ChatModel>,
    temperature: f32,
    exchange_log: ExchangeLog,
}

impl ComposerAgent {
    pub fn new(chat: Arc<dyn ChatModel>, exchange_log: ExchangeLog) -> Self {
        Self {
            chat,
            temperature: DEFAULT_TEMPERATURE,
            exchange_log,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Generates an answer for the conversation from `context`, appending the
    /// Sources footer unless the suppression policy applies.
    ///
    /// Generation failures come back as [`GENERATION_ERROR`] and are not
    /// logged to the exchange log.
    pub async fn compose(
        &self,
        messages: &[ChatMessage],
        user_query: &str,
        context: &str,
        citations: &[CitationEntry],
    ) -> String {
        let prompt = build_prompt(messages, context);

        let answer = match self.chat.complete(&prompt, self.temperature).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Composer: generation error: {}", e);
                metrics::record_outcome(metrics::OUTCOME_GENERATION_FAILED);
                return GENERATION_ERROR.to_string();
            }
        };

        let answer = attach_sources(answer, user_query, citations);
        metrics::record_outcome(metrics::OUTCOME_ANSWERED);

        self.exchange_log.record(user_query, context, &answer).await;
        answer
    }
}

/// System prompt, the conversation as received, then one context turn.
pub fn build_prompt(messages: &[ChatMessage], context: &str) -> Vec<ChatMessage> {
    let mut prompt = Vec::with_capacity(messages.len() + 2);
    prompt.push(ChatMessage::system(SYSTEM_PROMPT));
    prompt.extend_from_slice(messages);
    prompt.push(ChatMessage::user(format!(
        "Context:\n{}\n\nBased on this context, please answer the above conversation.",
        context
    )));
    prompt
}

pub fn attach_sources(answer: String, user_query: &str, citations: &[CitationEntry]) -> String {
    if citations.is_empty() || !should_attach_sources(user_query, &answer) {
        return answer;
    }

    info!("Composer: attaching {} citations", citations.len());
    metrics::CITATIONS_ATTACHED.inc_by(citations.len() as u64);
    format!("{}{}", answer, sources_block(citations))
}
