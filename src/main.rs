use std::sync::Arc;

use movie_recommender::{
    config::Config,
    index::SimilarityIndex,
    routes::{create_router, AppState},
    services::posters::TmdbPosterResolver,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The service cannot answer anything without the index
    let index = SimilarityIndex::load(&config.index_path)?;
    let posters = TmdbPosterResolver::from_config(&config)?;

    let state = AppState::new(Arc::new(index), Arc::new(posters))
        .with_recommendation_count(config.recommendation_count);
    let app = create_router(Arc::new(state));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
