use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use roomsync_protocol::{endpoints, Verb};
use roomsync_sync::SyncHandler;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AccessGate};
use crate::handler;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub sync: Arc<SyncHandler>,
    pub gate: Arc<dyn AccessGate>,
}

impl AppState {
    pub fn new(sync: Arc<SyncHandler>, gate: Arc<dyn AccessGate>) -> Self {
        Self { sync, gate }
    }
}

/// Evaluate the access gate before the request reaches its handler.
async fn gate_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let verb = Verb::from_method(request.method().as_str());
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.as_bytes().to_vec());
    match auth::authorize(state.gate.as_ref(), authorization.as_deref(), verb).await {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Build the axum router with all roomsync endpoints.
pub fn build_router(state: AppState, max_upload_size: usize) -> Router {
    Router::new()
        .route(endpoints::PROJECTS, get(handler::list_projects))
        .route(endpoints::HEALTH, get(handler::health))
        .route(
            endpoints::PROJECT,
            post(handler::create_project).delete(handler::delete_project),
        )
        .route(
            endpoints::ARTIFACT,
            get(handler::fetch_latest).post(handler::upload),
        )
        .route(endpoints::ARTIFACT_FETCH, get(handler::fetch))
        .route(endpoints::ARTIFACT_CHECK, get(handler::check_freshness))
        .layer(middleware::from_fn_with_state(state.clone(), gate_requests))
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
