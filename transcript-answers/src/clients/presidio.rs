//! Presidio analyzer/anonymizer REST client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{endpoint, read_json};
use crate::agents::{PiiDetector, PiiEntity};
use crate::error::ServiceError;

#[derive(Clone)]
pub struct PresidioClient {
    client: Client,
    analyzer_url: String,
    anonymizer_url: String,
}

impl PresidioClient {
    pub fn new(
        client: Client,
        analyzer_url: impl Into<String>,
        anonymizer_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            analyzer_url: analyzer_url.into(),
            anonymizer_url: anonymizer_url.into(),
        }
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Serialize)]
struct AnonymizeRequest<'a> {
    text: &'a str,
    analyzer_results: &'a [PiiEntity],
}

#[derive(Deserialize)]
struct AnonymizeResponse {
    text: String,
}

#[async_trait]
impl PiiDetector for PresidioClient {
    async fn analyze(&self, text: &str, language: &str) -> Result<Vec<PiiEntity>, ServiceError> {
        let response = self
            .client
            .post(endpoint(&self.analyzer_url, "/analyze"))
            .json(&AnalyzeRequest { text, language })
            .send()
            .await?;

        read_json("presidio-analyzer", response).await
    }

    async fn anonymize(&self, text: &str, entities: &[PiiEntity]) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(endpoint(&self.anonymizer_url, "/anonymize"))
            .json(&AnonymizeRequest {
                text,
                analyzer_results: entities,
            })
            .send()
            .await?;

        let body: AnonymizeResponse = read_json("presidio-anonymizer", response).await?;
        Ok(body.text)
    }
}
