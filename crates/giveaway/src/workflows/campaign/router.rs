use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;

use super::repository::{GiveawayStore, RepositoryError};
use super::service::{DrawScope, GiveawayService, ImportMode, ServiceError};
use crate::workflows::entries::{EligibilityConfigPatch, EntryId, ExternalFlags, RawEntry};
use crate::workflows::import::{CommentImporter, ImportError, SheetImporter};

#[derive(Debug, Deserialize)]
pub(crate) struct EntriesImportRequest {
    pub(crate) entries: Vec<RawEntry>,
    #[serde(default)]
    pub(crate) mode: ImportMode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetImportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) mode: ImportMode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsImportRequest {
    pub(crate) comments: serde_json::Value,
    #[serde(default)]
    pub(crate) mode: ImportMode,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartDrawRequest {
    #[serde(default)]
    pub(crate) seed: Option<String>,
    #[serde(default)]
    pub(crate) scope: DrawScope,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfirmDrawRequest {
    #[serde(default)]
    pub(crate) drawn_by: Option<String>,
}

/// Router builder exposing entry intake, configuration, and draw endpoints.
pub fn campaign_router<S>(service: Arc<GiveawayService<S>>) -> Router
where
    S: GiveawayStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/entries",
            post(import_entries_handler::<S>)
                .get(list_entries_handler::<S>)
                .delete(clear_entries_handler::<S>),
        )
        .route("/api/v1/entries/sheet", post(import_sheet_handler::<S>))
        .route("/api/v1/entries/comments", post(import_comments_handler::<S>))
        .route("/api/v1/entries/stats", get(statistics_handler::<S>))
        .route(
            "/api/v1/entries/:entry_id/flags",
            put(update_flags_handler::<S>),
        )
        .route(
            "/api/v1/config",
            get(get_config_handler::<S>).patch(patch_config_handler::<S>),
        )
        .route(
            "/api/v1/draws",
            post(start_draw_handler::<S>)
                .get(history_handler::<S>)
                .delete(clear_history_handler::<S>),
        )
        .route("/api/v1/draws/confirm", post(confirm_draw_handler::<S>))
        .route("/api/v1/draws/discard", post(discard_draw_handler::<S>))
        .with_state(service)
}

pub(crate) async fn import_entries_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    Json(request): Json<EntriesImportRequest>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(service.import(request.entries, request.mode), StatusCode::OK)
}

pub(crate) async fn import_sheet_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    Json(request): Json<SheetImportRequest>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    match SheetImporter::from_reader(Cursor::new(request.csv.into_bytes())) {
        Ok(raw) => respond(service.import(raw, request.mode), StatusCode::OK),
        Err(error) => import_error_response(error),
    }
}

pub(crate) async fn import_comments_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    Json(request): Json<CommentsImportRequest>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    match CommentImporter::from_value(request.comments) {
        Ok(raw) => respond(service.import(raw, request.mode), StatusCode::OK),
        Err(error) => import_error_response(error),
    }
}

pub(crate) async fn list_entries_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(service.entries(), StatusCode::OK)
}

pub(crate) async fn clear_entries_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    no_content(service.clear_entries())
}

pub(crate) async fn statistics_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(service.statistics(), StatusCode::OK)
}

pub(crate) async fn update_flags_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    Path(entry_id): Path<String>,
    Json(flags): Json<ExternalFlags>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(
        service.update_flags(&EntryId(entry_id), flags),
        StatusCode::OK,
    )
}

pub(crate) async fn get_config_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(service.config(), StatusCode::OK)
}

pub(crate) async fn patch_config_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    Json(patch): Json<EligibilityConfigPatch>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(service.update_config(&patch), StatusCode::OK)
}

pub(crate) async fn start_draw_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    request: Option<Json<StartDrawRequest>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    let Json(request) = request.unwrap_or_default();
    respond(
        service.start_draw(request.seed.as_deref(), request.scope),
        StatusCode::OK,
    )
}

pub(crate) async fn confirm_draw_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
    request: Option<Json<ConfirmDrawRequest>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    let Json(request) = request.unwrap_or_default();
    let drawn_by = request.drawn_by.unwrap_or_default();
    respond(service.confirm_draw(&drawn_by), StatusCode::CREATED)
}

pub(crate) async fn discard_draw_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    no_content(service.discard_draw())
}

pub(crate) async fn history_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    respond(service.history(), StatusCode::OK)
}

pub(crate) async fn clear_history_handler<S>(
    State(service): State<Arc<GiveawayService<S>>>,
) -> Response
where
    S: GiveawayStore + 'static,
{
    no_content(service.clear_history())
}

fn respond<T: serde::Serialize>(result: Result<T, ServiceError>, status: StatusCode) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn no_content(result: Result<(), ServiceError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) fn service_error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Session(_) => StatusCode::CONFLICT,
        ServiceError::Config(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::EntryNotFound(_) | ServiceError::Repository(RepositoryError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        ServiceError::Repository(RepositoryError::Unavailable(_))
        | ServiceError::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn import_error_response(error: ImportError) -> Response {
    let status = match error {
        ImportError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
