use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use roomsync_protocol::{
    attachment_disposition, HealthResponse, UploadResponse, FINGERPRINT_HEADER, UPLOAD_FIELD,
};
use roomsync_sync::{FetchOutcome, Freshness, SyncHandler, SyncResult};
use roomsync_types::ArtifactKind;

use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Run a blocking sync operation off the async executor.
async fn blocking<T, F>(sync: &Arc<SyncHandler>, op: F) -> ServerResult<T>
where
    T: Send + 'static,
    F: FnOnce(&SyncHandler) -> SyncResult<T> + Send + 'static,
{
    let sync = Arc::clone(sync);
    tokio::task::spawn_blocking(move || op(&sync))
        .await
        .map_err(|e| ServerError::Internal(format!("storage task failed: {e}")))?
        .map_err(ServerError::from)
}

fn route_kind(segment: &str) -> ServerResult<ArtifactKind> {
    segment
        .parse()
        .map_err(|e| ServerError::NotFound(format!("{e}")))
}

fn fingerprint_header() -> HeaderName {
    HeaderName::from_static(FINGERPRINT_HEADER)
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /`: names of all projects.
pub async fn list_projects(State(state): State<AppState>) -> ServerResult<Json<Vec<String>>> {
    let names = blocking(&state.sync, |sync| sync.list_projects()).await?;
    Ok(Json(names))
}

/// `POST /{project}`: 201, or 409 if it already exists.
pub async fn create_project(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ServerResult<StatusCode> {
    blocking(&state.sync, move |sync| sync.create_project(&project)).await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /{project}`: 200, or 404 if there is no such project.
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> ServerResult<StatusCode> {
    blocking(&state.sync, move |sync| sync.remove_project(&project)).await?;
    Ok(StatusCode::OK)
}

/// `GET /{project}/{kind}/check/{hash}`: 202 if stale, 204 if current.
pub async fn check_freshness(
    State(state): State<AppState>,
    Path((project, kind, hash)): Path<(String, String, String)>,
) -> ServerResult<StatusCode> {
    let kind = route_kind(&kind)?;
    let freshness =
        blocking(&state.sync, move |sync| sync.check_freshness(&project, kind, &hash)).await?;
    Ok(match freshness {
        Freshness::Stale => StatusCode::ACCEPTED,
        Freshness::Current => StatusCode::NO_CONTENT,
    })
}

/// `GET /{project}/{kind}/{hash}`: the artifact if stale, 204 if current.
pub async fn fetch(
    State(state): State<AppState>,
    Path((project, kind, hash)): Path<(String, String, String)>,
) -> ServerResult<Response> {
    fetch_artifact(state, project, route_kind(&kind)?, hash).await
}

/// `GET /{project}/{kind}`: the artifact, unconditionally.
pub async fn fetch_latest(
    State(state): State<AppState>,
    Path((project, kind)): Path<(String, String)>,
) -> ServerResult<Response> {
    fetch_artifact(state, project, route_kind(&kind)?, String::new()).await
}

async fn fetch_artifact(
    state: AppState,
    project: String,
    kind: ArtifactKind,
    token: String,
) -> ServerResult<Response> {
    let outcome = blocking(&state.sync, move |sync| sync.fetch(&project, kind, &token)).await?;
    Ok(match outcome {
        FetchOutcome::NothingNew => StatusCode::NO_CONTENT.into_response(),
        FetchOutcome::Transfer(transfer) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, transfer.media_type().to_string()),
                (header::CONTENT_DISPOSITION, attachment_disposition(kind)),
                (fingerprint_header(), transfer.fingerprint.to_hex()),
            ],
            transfer.data,
        )
            .into_response(),
    })
}

/// `POST /{project}/{kind}`: multipart upload of the `file` field.
pub async fn upload(
    State(state): State<AppState>,
    Path((project, kind)): Path<(String, String)>,
    mut multipart: Multipart,
) -> ServerResult<Response> {
    let kind = route_kind(&kind)?;

    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| ServerError::BadRequest("upload has no file name".into()))?;
        let data = field.bytes().await?;
        file = Some((filename, data));
        break;
    }
    let (filename, data) = file.ok_or_else(|| {
        ServerError::BadRequest(format!("missing multipart field '{UPLOAD_FIELD}'"))
    })?;

    let receipt =
        blocking(&state.sync, move |sync| sync.upload(&project, kind, &filename, &data)).await?;
    let body = UploadResponse {
        project: receipt.project,
        kind: receipt.kind,
        size: receipt.size,
        fingerprint: receipt.fingerprint,
    };
    Ok((
        StatusCode::CREATED,
        [(fingerprint_header(), receipt.fingerprint.to_hex())],
        Json(body),
    )
        .into_response())
}
