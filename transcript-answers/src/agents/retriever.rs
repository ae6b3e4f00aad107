// Retriever Agent: embeds the query and pulls the closest transcript passages

use std::sync::Arc;

use tracing::{error, info};

use super::{Embedder, VectorIndex};
use crate::models::RetrievedPassage;

pub const DEFAULT_TOP_K: usize = 3;

pub struct RetrieverAgent {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    top_k: usize,
}

impl RetrieverAgent {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>, top_k: usize) -> Self {
        Self {
            embedder,
            index,
            top_k,
        }
    }

    /// `None` when the embedding service fails or returns an empty vector.
    pub async fn embed(&self, query: &str) -> Option<Vec<f32>> {
        match self.embedder.embed(query).await {
            Ok(vector) if !vector.is_empty() => Some(vector),
            Ok(_) => {
                error!("Retriever: embedding service returned an empty vector");
                None
            }
            Err(e) => {
                error!("Retriever: embed error: {}", e);
                None
            }
        }
    }

    /// Top-K passages for `vector`; empty when the index query fails.
    pub async fn search(&self, vector: &[f32]) -> Vec<RetrievedPassage> {
        match self.index.query(vector, self.top_k).await {
            Ok(passages) => {
                info!("Retriever: {} passages retrieved", passages.len());
                passages
            }
            Err(e) => {
                error!("Retriever: index query error: {}", e);
                vec![]
            }
        }
    }
}

/// Passage texts joined into the context blob handed to the composer.
pub fn build_context(passages: &[RetrievedPassage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedEmbedder(Result<Vec<f32>, ()>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, ServiceError> {
            self.0
                .clone()
                .map_err(|_| ServiceError::invalid("embeddings", "down"))
        }
    }

    struct RecordingIndex {
        passages: Option<Vec<RetrievedPassage>>,
        seen_top_k: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl VectorIndex for RecordingIndex {
        async fn query(
            &self,
            _vector: &[f32],
            top_k: usize,
        ) -> Result<Vec<RetrievedPassage>, ServiceError> {
            self.seen_top_k.lock().unwrap().push(top_k);
            self.passages
                .clone()
                .ok_or_else(|| ServiceError::invalid("pinecone", "down"))
        }
    }

    fn passage(text: &str) -> RetrievedPassage {
        RetrievedPassage {
            text: text.to_string(),
            title: "t".to_string(),
            link: None,
        }
    }

    fn agent(
        embedding: Result<Vec<f32>, ()>,
        passages: Option<Vec<RetrievedPassage>>,
    ) -> RetrieverAgent {
        RetrieverAgent::new(
            Arc::new(FixedEmbedder(embedding)),
            Arc::new(RecordingIndex {
                passages,
                seen_top_k: Mutex::new(vec![]),
            }),
            DEFAULT_TOP_K,
        )
    }

    #[tokio::test]
    async fn embed_failures_become_none() {
        assert_eq!(agent(Err(()), None).embed("q").await, None);
        assert_eq!(agent(Ok(vec![]), None).embed("q").await, None);
        assert_eq!(agent(Ok(vec![0.5]), None).embed("q").await, Some(vec![0.5]));
    }

    #[tokio::test]
    async fn search_failure_is_empty() {
        assert!(agent(Ok(vec![1.0]), None).search(&[1.0]).await.is_empty());
    }

    #[tokio::test]
    async fn search_passes_top_k() {
        let index = Arc::new(RecordingIndex {
            passages: Some(vec![passage("a")]),
            seen_top_k: Mutex::new(vec![]),
        });
        let embedder = Arc::new(FixedEmbedder(Ok(vec![1.0])));
        let agent = RetrieverAgent::new(embedder, index.clone(), 7);

        let passages = agent.search(&[1.0]).await;

        assert_eq!(passages, vec![passage("a")]);
        assert_eq!(*index.seen_top_k.lock().unwrap(), vec![7]);
    }

    #[test]
    fn context_joins_all_passages() {
        let context = build_context(&[passage("[0 – 1] one"), passage("two")]);
        assert_eq!(context, "[0 – 1] one\n\n---\n\ntwo");
    }
}
