//! ==============================================================================
//! server.rs - http surface
//! ==============================================================================
//!
//! routes:
//!     POST /api/data   device pushes a reading (JSON object)
//!     GET  /api/data   current store contents as JSON
//!     GET  /           dashboard page that polls GET /api/data
//!
//! relationships:
//!     - used by: main.rs (builds the router, binds, serves)
//!     - uses: store.rs (ingest / snapshot), page.rs (dashboard html)
//!
//! the store is handed to every handler through axum state, so tests can
//! build a router around their own store without a socket.
//!
//! ==============================================================================

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap},
    response::{Html, Json},
    routing::get,
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::{StatusResponse, StoreView};
use crate::error::IngestError;
use crate::page;
use crate::store::SensorStore;

pub type SharedStore = Arc<SensorStore>;

pub fn build_router(store: SharedStore, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api/data", get(snapshot_handler).post(ingest_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// serve `app` on `listener` until `shutdown` resolves
///
/// peer addresses are attached to every request so handlers can read them
/// with `ConnectInfo`.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// POST /api/data
async fn ingest_handler(
    State(store): State<SharedStore>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StatusResponse>, IngestError> {
    require_json(&headers)?;
    store.ingest(&body, &peer.ip().to_string()).await?;
    Ok(Json(StatusResponse::RECEIVED))
}

/// GET /api/data
async fn snapshot_handler(State(store): State<SharedStore>) -> Json<StoreView> {
    Json(store.snapshot().await)
}

/// GET /
async fn dashboard_handler(
    State(store): State<SharedStore>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> Html<String> {
    Html(page::render_dashboard(&peer.ip().to_string(), store.capacity()))
}

/// accept `application/json` and `application/*+json`, parameters ignored
fn require_json(headers: &HeaderMap) -> Result<(), IngestError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    let is_json = mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"));
    if is_json {
        Ok(())
    } else {
        Err(IngestError::NotJson(if content_type.is_empty() {
            "none".to_string()
        } else {
            content_type.to_string()
        }))
    }
}
