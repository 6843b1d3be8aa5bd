use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use candor::api::{create_router, AppState};
use candor::config::Config;
use candor::embeddings::EmbeddingProvider;
use candor::storage::SessionStore;
use candor::transcription::TranscriptionProvider;

#[derive(Parser)]
#[command(name = "candor")]
#[command(about = "Resume-to-assessment pipeline: parse resumes, plan interviews, score answers")]
struct Args {
    /// Block startup until the embedding model is loaded instead of
    /// loading it in the background.
    #[arg(long)]
    preload_model: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "candor=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("Using storage root: {}", config.storage.root);
    let store = SessionStore::new(&config.storage.root);
    tokio::fs::create_dir_all(store.root()).await?;

    let embeddings = EmbeddingProvider::deferred(&config.embeddings);
    if args.preload_model {
        tracing::info!("Loading embedding model: {}...", config.embeddings.model);
        embeddings.load().await?;
    } else {
        tracing::info!(
            "Loading embedding model in background: {}...",
            config.embeddings.model
        );
        let loader = embeddings.clone();
        tokio::spawn(async move {
            match loader.load().await {
                Ok(()) => tracing::info!("Embedding model ready"),
                Err(e) => tracing::error!("Embedding model failed to load: {}", e),
            }
        });
    }

    tracing::info!(
        "Initializing transcription provider: {}...",
        config.transcription.model
    );
    let transcription = TranscriptionProvider::new(&config.transcription);
    if !transcription.is_available() {
        tracing::warn!("Transcription unavailable - audio answers will be rejected");
    }

    let state = AppState::new(config.clone(), store, embeddings, transcription);

    let cancel_token = CancellationToken::new();

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Candor starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
