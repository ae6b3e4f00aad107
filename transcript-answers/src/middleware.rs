use std::sync::Arc;

use warp::{Filter, Rejection};

use crate::error::ApiError;

pub fn cors() -> warp::cors::Builder {
    warp::cors()
        .allow_any_origin()
        .allow_headers(vec![
            "User-Agent",
            "Sec-Fetch-Mode",
            "Referer",
            "Origin",
            "Access-Control-Request-Method",
            "Access-Control-Request-Headers",
            "Content-Type",
            "Authorization",
            "Accept",
            "Content-Length",
        ])
        .allow_methods(vec!["POST", "GET", "OPTIONS"])
}

/// Rejects with [`ApiError::Forbidden`] unless the `Authorization` header
/// carries the shared secret. No secret means no check.
pub fn require_api_key(
    expected: Option<Arc<str>>,
) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and_then(move |header: Option<String>| {
            let expected = expected.clone();
            async move {
                if is_authorized(expected.as_deref(), header.as_deref()) {
                    Ok(())
                } else {
                    Err(warp::reject::custom(ApiError::Forbidden))
                }
            }
        })
        .untuple_one()
}

/// Accepts the secret either bare or as a `Bearer` token.
pub fn is_authorized(expected: Option<&str>, header: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return true;
    };

    match header {
        Some(value) => value.strip_prefix("Bearer ").unwrap_or(value) == expected,
        None => false,
    }
}
