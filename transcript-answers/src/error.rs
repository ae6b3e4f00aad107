use thiserror::Error;
use warp::http::StatusCode;
use warp::{reject::Reject, Rejection, Reply};

/// Failure talking to one of the outbound collaborators
/// (PII detector, embedding service, vector index, generation service).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} returned an unusable response: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

impl ServiceError {
    pub fn invalid(service: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("PII redaction failed: {0}")]
    Redaction(#[source] ServiceError),
}

#[derive(Error, Debug)]
pub enum ExchangeLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("log writer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Could not validate credentials")]
    Forbidden,

    #[error("LLM error: {0}")]
    Pipeline(#[from] PipelineError),
}

impl Reject for ApiError {}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(api_err) = err.find::<ApiError>() {
        let code = match api_err {
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let json = warp::reply::json(&serde_json::json!({
            "detail": api_err.to_string(),
        }));

        Ok(warp::reply::with_status(json, code))
    } else {
        Err(err)
    }
}
