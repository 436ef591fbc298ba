use std::sync::Arc;

use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use startpage::aggregator::FeedAggregator;
use startpage::board::{start_background_refresh, FeedBoard};
use startpage::config::Config;
use startpage::fetcher::Fetcher;
use startpage::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "startpage=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("STARTPAGE_CONFIG").unwrap_or_else(|_| "startpage.toml".to_string());
    let config = Config::load(&config_path)?;
    info!(
        "Loaded {} sources from {}",
        config.sources.len(),
        config_path
    );

    let fetcher = Fetcher::new(&config.endpoints, config.items_per_source)?;
    let aggregator = FeedAggregator::new(config.sources.clone(), fetcher)?;
    let board = Arc::new(FeedBoard::new(aggregator));

    // Start background refresh task
    let bg_board = board.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        start_background_refresh(bg_board, refresh_interval).await;
    });

    // Create app state
    let state = Arc::new(AppState {
        board,
        items_per_page: config.items_per_page,
    });

    // Build router
    let app = routes::app(state)
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http());

    // Start server
    let listen = std::env::var("STARTPAGE_LISTEN").unwrap_or(config.listen);
    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("Server starting on http://{}", listen);

    axum::serve(listener, app).await?;

    Ok(())
}
