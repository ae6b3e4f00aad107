use warp::{Rejection, Reply};

pub async fn handle_health() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({"status": "healthy"})))
}
