//! Retrieval-augmented answers over video transcripts, served behind an
//! OpenAI-compatible chat completions endpoint.

pub mod agents;
pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod exchange_log;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pipeline;

pub use crate::config::Config;
pub use crate::pipeline::AnswerPipeline;
