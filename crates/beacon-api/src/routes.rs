//! Router setup with all API routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use beacon_core::BeaconError;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::rate_limit::{rate_limit_middleware, RateLimiter, DEFAULT_REQUESTS_PER_SEC};
use crate::state::AppState;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The site is served from the same host; allow its localhost origins.
    let port = state.config.general.port;
    let origins: Vec<HeaderValue> = [
        format!("http://127.0.0.1:{}", port),
        format!("http://localhost:{}", port),
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/knowledge", get(handlers::knowledge));

    let chat_routes = Router::new()
        .route("/chat/respond", post(handlers::respond_once))
        .route("/chat/sessions", post(handlers::create_session))
        .route(
            "/chat/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/chat/sessions/{id}/messages", post(handlers::post_message))
        .layer(axum::middleware::from_fn(rate_limit_middleware))
        .layer(axum::Extension(RateLimiter::new(DEFAULT_REQUESTS_PER_SEC)));

    public_routes
        .merge(chat_routes)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API on 127.0.0.1 at the configured port until the process exits.
pub async fn start_server(state: AppState) -> Result<(), BeaconError> {
    let addr = format!("127.0.0.1:{}", state.config.general.port);
    let router = create_router(state);

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BeaconError::Api(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| BeaconError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
