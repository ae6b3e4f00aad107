use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

const ENV_PREFIX: &str = "YQ";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Shared secret for inbound requests. Unset disables the check.
    pub chat_api_key: Option<String>,
    pub model_id: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub pinecone_api_key: String,
    pub pinecone_index_host: String,
    pub pinecone_namespace: String,
    pub top_k: usize,
    pub presidio_analyzer_url: String,
    pub presidio_anonymizer_url: String,
    pub pii_language: String,
    pub exchange_log_path: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Reads `.env` if present, then `YQ_*` environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::load(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Layers `source` over the built-in defaults.
    pub fn load<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .set_default("port", 8080_i64)?
            .set_default("log_level", "info")?
            .set_default("model_id", "YQ Answers")?
            .set_default("openai_base_url", "https://api.openai.com/v1")?
            .set_default("embedding_model", "text-embedding-3-large")?
            .set_default("chat_model", "gpt-4o-mini")?
            .set_default("temperature", 0.3_f64)?
            .set_default("pinecone_namespace", "ns1")?
            .set_default("top_k", 3_i64)?
            .set_default("presidio_analyzer_url", "http://localhost:5002")?
            .set_default("presidio_anonymizer_url", "http://localhost:5001")?
            .set_default("pii_language", "en")?
            .set_default("exchange_log_path", "chat_history.csv")?
            .set_default("request_timeout_secs", 60_i64)?
            .add_source(source)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn exchange_log_path(&self) -> Option<&Path> {
        let path = self.exchange_log_path.trim();
        if path.is_empty() {
            None
        } else {
            Some(Path::new(path))
        }
    }

    pub fn chat_api_key(&self) -> Option<&str> {
        self.chat_api_key.as_deref().filter(|key| !key.is_empty())
    }
}
