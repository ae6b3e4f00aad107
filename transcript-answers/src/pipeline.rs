use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::agents::citations::build_citations;
use crate::agents::composer::ComposerAgent;
use crate::agents::redactor::RedactorAgent;
use crate::agents::retriever::{build_context, RetrieverAgent};
use crate::clients::{http_client, OpenAiClient, PineconeClient, PresidioClient};
use crate::config::Config;
use crate::error::{PipelineError, ServiceError};
use crate::exchange_log::ExchangeLog;
use crate::metrics;
use crate::models::{last_user_message, ChatMessage};

pub const NO_USER_MESSAGE: &str = "No user message found.";
pub const EMBEDDING_ERROR: &str =
    "Sorry, I couldn't process your request... (Backend Error - Embedding)";
pub const SEARCH_ERROR: &str =
    "Sorry, I couldn't process your request... (Backend Error - Search Pinecone)";

/// Redact → embed → search → compose, wired once at startup and shared by
/// every request.
pub struct AnswerPipeline {
    redactor: RedactorAgent,
    retriever: RetrieverAgent,
    composer: ComposerAgent,
}

impl AnswerPipeline {
    pub fn new(
        redactor: RedactorAgent,
        retriever: RetrieverAgent,
        composer: ComposerAgent,
    ) -> Self {
        Self {
            redactor,
            retriever,
            composer,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let http = http_client(config.request_timeout_secs)?;

        let presidio = Arc::new(PresidioClient::new(
            http.clone(),
            &config.presidio_analyzer_url,
            &config.presidio_anonymizer_url,
        ));
        let openai = Arc::new(OpenAiClient::new(
            http.clone(),
            &config.openai_base_url,
            &config.openai_api_key,
            &config.embedding_model,
            &config.chat_model,
        ));
        let pinecone = Arc::new(PineconeClient::new(
            http,
            &config.pinecone_index_host,
            &config.pinecone_api_key,
            &config.pinecone_namespace,
        ));

        let exchange_log = match config.exchange_log_path() {
            Some(path) => ExchangeLog::new(path),
            None => {
                warn!("Exchange log disabled");
                ExchangeLog::disabled()
            }
        };

        Ok(Self::new(
            RedactorAgent::new(presidio, &config.pii_language),
            RetrieverAgent::new(openai.clone(), pinecone, config.top_k),
            ComposerAgent::new(openai, exchange_log).with_temperature(config.temperature),
        ))
    }

    /// Answers the conversation. Upstream failures other than redaction come
    /// back as fixed apology strings rather than errors.
    pub async fn answer(&self, messages: &[ChatMessage]) -> Result<String, PipelineError> {
        let request_id = Uuid::new_v4();

        let Some(user_message) = last_user_message(messages) else {
            info!(
                "[{}] No user message in {} messages",
                request_id,
                messages.len()
            );
            metrics::record_outcome(metrics::OUTCOME_NO_USER_MESSAGE);
            return Ok(NO_USER_MESSAGE.to_string());
        };

        let query = self.redactor.redact(user_message).await.map_err(|e| {
            metrics::record_outcome(metrics::OUTCOME_ERROR);
            PipelineError::Redaction(e)
        })?;
        info!("[{}] Processing query: {}", request_id, query);

        let Some(vector) = self.retriever.embed(&query).await else {
            metrics::record_outcome(metrics::OUTCOME_EMBEDDING_FAILED);
            return Ok(EMBEDDING_ERROR.to_string());
        };

        let passages = self.retriever.search(&vector).await;
        if passages.is_empty() {
            metrics::record_outcome(metrics::OUTCOME_SEARCH_FAILED);
            return Ok(SEARCH_ERROR.to_string());
        }

        let context = build_context(&passages);
        let citations = build_citations(&passages);
        info!(
            "[{}] {} passages, {} distinct sources",
            request_id,
            passages.len(),
            citations.len()
        );

        Ok(self
            .composer
            .compose(messages, user_message, &context, &citations)
            .await)
    }
}
