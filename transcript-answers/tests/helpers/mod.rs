//! Shared fakes for pipeline and API tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use transcript_answers::agents::composer::ComposerAgent;
use transcript_answers::agents::redactor::RedactorAgent;
use transcript_answers::agents::retriever::RetrieverAgent;
use transcript_answers::agents::{ChatModel, Embedder, PiiDetector, PiiEntity, VectorIndex};
use transcript_answers::error::ServiceError;
use transcript_answers::exchange_log::ExchangeLog;
use transcript_answers::models::{ChatMessage, RetrievedPassage};
use transcript_answers::AnswerPipeline;

/// Redacts e-mail-looking tokens; fails when `fail` is set.
pub struct FakeDetector {
    pub fail: bool,
}

#[async_trait]
impl PiiDetector for FakeDetector {
    async fn analyze(&self, text: &str, _language: &str) -> Result<Vec<PiiEntity>, ServiceError> {
        if self.fail {
            return Err(ServiceError::Status {
                service: "presidio-analyzer",
                status: 503,
                body: "analyzer offline".to_string(),
            });
        }
        Ok(text
            .split_whitespace()
            .filter(|word| word.contains('@'))
            .map(|word| json!({"entity_type": "EMAIL_ADDRESS", "text": word}))
            .collect())
    }

    async fn anonymize(&self, text: &str, entities: &[PiiEntity]) -> Result<String, ServiceError> {
        let mut redacted = text.to_string();
        for entity in entities {
            if let Some(word) = entity["text"].as_str() {
                redacted = redacted.replace(word, "<EMAIL_ADDRESS>");
            }
        }
        Ok(redacted)
    }
}

#[derive(Default)]
pub struct FakeEmbedder {
    pub fail: bool,
    pub queries: Mutex<Vec<String>>,
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError> {
        self.queries.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(ServiceError::invalid("openai", "embedding unavailable"));
        }
        Ok(vec![0.1, 0.2, 0.3])
    }
}

pub struct FakeIndex {
    pub passages: Vec<RetrievedPassage>,
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(
        &self,
        _vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, ServiceError> {
        Ok(self.passages.iter().take(top_k).cloned().collect())
    }
}

pub struct FakeChat {
    pub reply: Option<String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _temperature: f32,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(messages.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| ServiceError::invalid("openai", "completion unavailable"))
    }
}

pub fn passage(link: Option<&str>, title: &str, text: &str) -> RetrievedPassage {
    RetrievedPassage {
        text: text.to_string(),
        title: title.to_string(),
        link: link.map(str::to_string),
    }
}

/// The three passages from the dedup example: A twice, then B.
pub fn dedup_passages() -> Vec<RetrievedPassage> {
    vec![
        passage(Some("https://youtu.be/A?v=a"), "Tafsir A", "[10 – 20] x"),
        passage(Some("https://youtu.be/A?v=a"), "Tafsir A (early)", "[5 – 9] y"),
        passage(Some("https://youtu.be/B?v=b"), "Seerah B", "[1 – 2] z"),
    ]
}

pub struct Harness {
    pub pipeline: Arc<AnswerPipeline>,
    pub embedder: Arc<FakeEmbedder>,
    pub chat: Arc<FakeChat>,
}

pub struct HarnessBuilder {
    detector_fails: bool,
    embedder_fails: bool,
    passages: Vec<RetrievedPassage>,
    chat: FakeChat,
    exchange_log: ExchangeLog,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            detector_fails: false,
            embedder_fails: false,
            passages: dedup_passages(),
            chat: FakeChat::replying("Answer from the transcripts."),
            exchange_log: ExchangeLog::disabled(),
        }
    }

    pub fn detector_fails(mut self) -> Self {
        self.detector_fails = true;
        self
    }

    pub fn embedder_fails(mut self) -> Self {
        self.embedder_fails = true;
        self
    }

    pub fn passages(mut self, passages: Vec<RetrievedPassage>) -> Self {
        self.passages = passages;
        self
    }

    pub fn chat(mut self, chat: FakeChat) -> Self {
        self.chat = chat;
        self
    }

    pub fn exchange_log(mut self, exchange_log: ExchangeLog) -> Self {
        self.exchange_log = exchange_log;
        self
    }

    pub fn build(self) -> Harness {
        let embedder = Arc::new(FakeEmbedder {
            fail: self.embedder_fails,
            ..Default::default()
        });
        let chat = Arc::new(self.chat);

        let pipeline = AnswerPipeline::new(
            RedactorAgent::new(
                Arc::new(FakeDetector {
                    fail: self.detector_fails,
                }),
                "en",
            ),
            RetrieverAgent::new(
                embedder.clone(),
                Arc::new(FakeIndex {
                    passages: self.passages,
                }),
                3,
            ),
            ComposerAgent::new(chat.clone(), self.exchange_log),
        );

        Harness {
            pipeline: Arc::new(pipeline),
            embedder,
            chat,
        }
    }
}
