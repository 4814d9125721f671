use std::sync::Arc;

use parallax_api::{
    config::Config,
    db,
    routes::{create_router, AppState},
    services::{sources::PgMovieSource, RecommendationService},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("parallax_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    let source = Arc::new(PgMovieSource::new(pool));

    let state = Arc::new(AppState {
        recommendations: RecommendationService::new(source, config.recommender()),
        default_count: config.default_recommendation_count,
        max_count: config.max_recommendation_count,
    });

    tracing::info!(weights = ?config.weights(), "Recommender configured");

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
