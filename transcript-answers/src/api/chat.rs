use std::sync::Arc;

use tracing::{error, info};
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use crate::pipeline::AnswerPipeline;

pub async fn handle_chat_completion(
    request: ChatCompletionRequest,
    pipeline: Arc<AnswerPipeline>,
) -> Result<impl Reply, Rejection> {
    let ChatCompletionRequest { model, messages, .. } = request;
    info!(
        "Chat completion for model '{}' with {} messages",
        model,
        messages.len()
    );

    match pipeline.answer(&messages).await {
        Ok(answer) => Ok(warp::reply::json(&ChatCompletionResponse::from_answer(
            model, answer,
        ))),
        Err(e) => {
            error!("LLM error: {}", e);
            Err(warp::reject::custom(ApiError::from(e)))
        }
    }
}
