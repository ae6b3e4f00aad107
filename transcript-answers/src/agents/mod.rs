use async_trait::async_trait;
use serde_json::Value;

use crate::error::ServiceError;
use crate::models::{ChatMessage, RetrievedPassage};

pub mod citations;
pub mod composer;
pub mod policy;
pub mod redactor;
pub mod retriever;

/// Detected PII span as reported by the analyzer. Passed back to the
/// anonymizer untouched.
pub type PiiEntity = Value;

#[async_trait]
pub trait PiiDetector: Send + Sync {
    async fn analyze(&self, text: &str, language: &str)
        -> Result<Vec<PiiEntity>, ServiceError>;

    async fn anonymize(&self, text: &str, entities: &[PiiEntity])
        -> Result<String, ServiceError>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError>;
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, ServiceError>;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, ServiceError>;
}
