//! Pinecone data-plane query client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{endpoint, read_json};
use crate::agents::VectorIndex;
use crate::error::ServiceError;
use crate::models::RetrievedPassage;

const SERVICE: &str = "pinecone";
const API_VERSION: &str = "2024-07";

#[derive(Clone)]
pub struct PineconeClient {
    client: Client,
    index_host: String,
    api_key: String,
    namespace: String,
}

impl PineconeClient {
    pub fn new(
        client: Client,
        index_host: impl Into<String>,
        api_key: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        let index_host = index_host.into();
        // Pinecone hands out bare hostnames.
        let index_host = if index_host.starts_with("http://") || index_host.starts_with("https://")
        {
            index_host
        } else {
            format!("https://{}", index_host)
        };

        Self {
            client,
            index_host,
            api_key: api_key.into(),
            namespace: namespace.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    namespace: &'a str,
    vector: &'a [f32],
    top_k: usize,
    include_values: bool,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    #[serde(default)]
    metadata: Value,
}

#[async_trait]
impl VectorIndex for PineconeClient {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, ServiceError> {
        let response = self
            .client
            .post(endpoint(&self.index_host, "/query"))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&QueryRequest {
                namespace: &self.namespace,
                vector,
                top_k,
                include_values: false,
                include_metadata: true,
            })
            .send()
            .await?;

        let body: QueryResponse = read_json(SERVICE, response).await?;
        Ok(body
            .matches
            .iter()
            .map(|m| RetrievedPassage::from_metadata(&m.metadata))
            .collect())
    }
}
