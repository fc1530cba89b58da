use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod audio;
mod config;
mod error;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use tts::{GeminiClient, TtsService};

#[tokio::main]
async fn main() {
    // Load .env before reading any configuration
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            tracing::error!("Create a .env file with GEMINI_API_KEY=your_api_key or export it");
            std::process::exit(1);
        }
    };

    let addr = config.addr().expect("Invalid address");

    tracing::info!("Gemini TTS Relay v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Model: {}", config.model);
    tracing::info!("API key: {}", config.masked_api_key());
    tracing::info!("Static directory: {}", config.static_dir.display());

    if !config.static_dir.exists() {
        std::fs::create_dir_all(&config.static_dir)
            .expect("Failed to create static directory");
        tracing::info!("Created directory: {}", config.static_dir.display());
    }

    // Create TTS service
    let client = GeminiClient::new(&config).expect("Failed to create Gemini client");
    let tts = TtsService::new(Arc::new(client));

    // Create app state
    let state = Arc::new(AppState { tts, config });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
