//! Access-control and route-composition layer of the college portal.
//!
//! One server fronts three systems: the main site, the placement portal
//! under `/placement` and the student records portal under `/records`.
//! Every page request is resolved against the route table, guarded on the
//! session held in cookies, and rendered as a page view inside its system's
//! chrome. API calls under `/api` reach the REST backend through a gateway
//! that ends the session centrally on 401/403.

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;

use api::api_router;
use auth::auth_router;
use config::Config;
use errors::AppError;
use middleware::request_tracing_middleware;
use router::page_router;
use state::AppState;

/// Assembles the full application: health check, auth, API and pages.
pub fn build_app(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .nest("/auth", auth_router())
        .nest("/api", api_router())
        .with_state(state.clone())
        .fallback_service(page_router(state.clone()));

    if let Some(cors) = cors_layer(&state.config) {
        app = app.layer(cors);
    }

    app.layer(from_fn(request_tracing_middleware))
}

fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let origin = config.allowed_origin.as_deref()?;
    match HeaderValue::from_str(origin) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        ),
        Err(err) => {
            warn!(%err, origin, "ignoring unusable allowed origin");
            None
        }
    }
}

/// Binds the configured address and serves until ctrl-c or SIGTERM.
pub async fn start_server(config: Config) -> Result<(), AppError> {
    let address = config.bind_addr();
    let state = AppState::new(config)?;
    let app = build_app(state);

    info!(%address, "binding");
    let listener = TcpListener::bind(address).await?;
    info!(%address, "portal running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("portal shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                warn!(%err, "failed to install terminate handler");
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
