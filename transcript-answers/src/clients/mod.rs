use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

pub mod openai;
pub mod pinecone;
pub mod presidio;

pub use openai::OpenAiClient;
pub use pinecone::PineconeClient;
pub use presidio::PresidioClient;

pub fn http_client(timeout_secs: u64) -> Result<Client, ServiceError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Passes successful responses through; anything else becomes
/// [`ServiceError::Status`] carrying the response body.
pub(crate) async fn check_status(
    service: &'static str,
    response: Response,
) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

/// Status check plus JSON decode. A body that does not match `T` is an
/// [`ServiceError::InvalidResponse`], not a transport failure.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, ServiceError> {
    let body = check_status(service, response).await?.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ServiceError::invalid(service, e.to_string()))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
