use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use linkout_api::config::{ServerConfig, UpstreamConfig};
use linkout_api::router::build_app_router;
use linkout_api::state::{AppState, SharedTabular};
use linkout_gateway::{RazorpayGateway, VercelBlob};
use linkout_sheets::auth::{ServiceAccount, TokenProvider};
use linkout_sheets::google::GoogleSheets;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "linkout_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let upstream = UpstreamConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Spreadsheet backend ---
    let http = reqwest::Client::new();
    let account: ServiceAccount = serde_json::from_str(&upstream.service_account_json)
        .expect("SERVICE_ACCOUNT_JSON must be a valid service-account key");
    let token = TokenProvider::new(account, http.clone());
    let sheet: SharedTabular = Arc::new(GoogleSheets::new(
        upstream.spreadsheet_id.clone(),
        token,
        http.clone(),
    ));

    if let Err(err) = sheet.ping().await {
        tracing::warn!(error = %err, "Spreadsheet not reachable at startup");
    } else {
        tracing::info!("Spreadsheet reachable");
    }

    // --- Gateways ---
    let gateway = Arc::new(RazorpayGateway::new(
        config.payment.key_id.clone(),
        config.payment.key_secret.clone(),
        http.clone(),
    ));
    let blob = Arc::new(VercelBlob::new(upstream.blob_token.clone(), http));

    // --- App state + router ---
    let state = AppState::new(config.clone(), sheet, gateway, blob);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
