use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use common::types::MessageBody;
use models::api::{ListResponse, RecordResponse, MSG_DELETED, MSG_RESOLVED, MSG_SUBMITTED};
use models::{ListQuery, SubmitSos};
use serde::Deserialize;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::AppState;

/// `GET /sos` query string. Only the type filter is accepted remotely;
/// listings always exclude resolved records.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// POST /sos
pub async fn submit_sos(
    State(state): State<AppState>,
    payload: Result<Json<SubmitSos>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordResponse>), JsonApiError> {
    let Json(input) = payload.map_err(|e| {
        warn!(error = %e, "rejected SOS payload");
        JsonApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
    })?;
    let record = state.sos.submit(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecordResponse { message: MSG_SUBMITTED.into(), data: record }),
    ))
}

/// GET /sos?type=<value>
pub async fn list_sos(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>, JsonApiError> {
    let Query(params) = params.map_err(|e| JsonApiError::bad_request(e.body_text()))?;
    let query = ListQuery { kind: params.kind, status: None };
    let records = state.sos.list(&query).await?;
    Ok(Json(ListResponse::new(records)))
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<String, JsonApiError> {
    let Path(id) = path.map_err(|e| {
        warn!(error = %e, "rejected SOS id");
        JsonApiError::bad_request(format!("Invalid SOS ID: {}", e.body_text()))
    })?;
    Ok(id)
}

/// POST /sos/:id/resolve
pub async fn resolve_sos(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RecordResponse>, JsonApiError> {
    let id = path_id(path)?;
    let record = state.sos.resolve(&id).await?;
    Ok(Json(RecordResponse { message: MSG_RESOLVED.into(), data: record }))
}

/// DELETE /sos/:id
pub async fn delete_sos(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageBody>, JsonApiError> {
    let id = path_id(path)?;
    state.sos.delete(&id).await?;
    Ok(Json(MessageBody::new(MSG_DELETED)))
}
