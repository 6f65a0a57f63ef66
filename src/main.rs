use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use notes_demo::config;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_demo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fetch env variables
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    let addr = cfg.bind_addr().unwrap_or_else(|e| {
        tracing::error!("Invalid listen address: {e}");
        panic!("invalid listen address: {e}");
    });

    // Service and router creation
    let app = notes_demo::app(notes_demo::seeded_service());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {addr}: {e}");
            panic!("failed to bind {addr}: {e}");
        });

    tracing::info!("Server running on port {}", cfg.port);
    axum::serve(listener, app)
        .await
        .expect("failed to start server");
}
