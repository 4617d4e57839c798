use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use common::Config;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

use routes::{
    health_handler,
    levels::{
        create_level_handler, delete_level_handler, get_level_handler, list_levels_handler,
        update_level_handler,
    },
    rankings::ranking_handler,
};
pub use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    // The token travels in a cookie, so origins must be listed explicitly.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(state.config.server.cors_max_age);

    Router::new()
        .route("/health", get(health_handler))
        .route("/rankings/:kind", get(ranking_handler))
        .route(
            "/author-levels",
            get(list_levels_handler).post(create_level_handler),
        )
        .route(
            "/author-levels/:id",
            get(get_level_handler)
                .put(update_level_handler)
                .delete(delete_level_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Initializing state (backend: {}, failure policy: {})",
        config.backend.base_url, config.rankings.failure_policy
    );
    let state = AppState::new(config)?;

    let address = format!("0.0.0.0:{}", state.config.server.port);
    let app = build_router(state);

    info!("Binding to {}", address);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
