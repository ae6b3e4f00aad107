use warp::{Rejection, Reply};

use crate::models::ModelList;

pub async fn handle_list_models(model_id: String) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&ModelList::single(&model_id)))
}
