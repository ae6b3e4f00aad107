use std::sync::Arc;

use tracing::info;
use warp::Filter;

use transcript_answers::{api, middleware, AnswerPipeline, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!("Starting transcript answers service");
    info!(
        "Configuration loaded (auth {})",
        if config.chat_api_key().is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    // Wire external clients into the pipeline
    let pipeline = Arc::new(AnswerPipeline::from_config(&config)?);
    info!("Answer pipeline ready");

    let api_routes = api::routes(
        pipeline,
        config.chat_api_key().map(str::to_string),
        config.model_id.clone(),
    );

    let routes = api_routes
        .with(warp::log("api"))
        .with(middleware::cors());

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    })?;
    info!("Server listening on {}", bound);

    server.await;

    Ok(())
}
