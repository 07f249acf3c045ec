//! Gateway Server Binary
//!
//! Standalone binary that serves the JSON gateway over an in-memory store.
//! Useful for exercising the anchor/link endpoints from a browser or curl
//! without the full application around them.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gateway
//!
//! # Custom port
//! GATEWAY_PORT=3002 cargo run --bin gateway
//! ```
//!
//! # Environment Variables
//!
//! - `GATEWAY_PORT`: Server port (default: 3001)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;

use myhypermedia_core::http::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port = env::var("GATEWAY_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);

    tracing::info!("🚀 MyHypermedia gateway");
    tracing::info!("📡 Port: {}", port);

    let app = router(AppState::in_memory());
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!("✅ Listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}
