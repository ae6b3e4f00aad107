use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::error::handle_rejection;
use crate::metrics;
use crate::middleware::require_api_key;
use crate::pipeline::AnswerPipeline;

mod chat;
mod health;
mod model_list;

pub fn routes(
    pipeline: Arc<AnswerPipeline>,
    api_key: Option<String>,
    model_id: String,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let api_key: Option<Arc<str>> = api_key.map(Arc::from);

    let chat_route = warp::path!("chat" / "completions")
        .and(warp::post())
        .and(require_api_key(api_key))
        .and(warp::body::json())
        .and(with_pipeline(pipeline))
        .and_then(chat::handle_chat_completion);

    let models_route = warp::path!("models")
        .and(warp::get())
        .and(warp::any().map(move || model_id.clone()))
        .and_then(model_list::handle_list_models);

    let health_route = warp::path::end()
        .or(warp::path!("health"))
        .unify()
        .and(warp::get())
        .and_then(health::handle_health);

    let metrics_route = warp::path!("metrics").and(warp::get()).map(|| {
        let (body, content_type) = metrics::gather();
        warp::reply::with_header(body, "Content-Type", content_type)
    });

    chat_route
        .or(models_route)
        .or(health_route)
        .or(metrics_route)
        .recover(handle_rejection)
}

fn with_pipeline(
    pipeline: Arc<AnswerPipeline>,
) -> impl Filter<Extract = (Arc<AnswerPipeline>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || pipeline.clone())
}
