//! Rainfall entry handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateRainfallRequest, RainfallEntryDto, UpdateRainfallRequest};
use crate::application::RainfallService;
use crate::interfaces::http::common::error::ErrorBody;
use crate::interfaces::http::common::{ApiError, MessageResponse, ValidatedJson};

#[derive(Clone)]
pub struct RainfallAppState {
    pub rainfall_service: Arc<RainfallService>,
}

#[utoipa::path(
    get,
    path = "/data",
    tag = "Rainfall",
    responses(
        (status = 200, description = "All entries in insertion order", body = Vec<RainfallEntryDto>),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_entries(
    State(state): State<RainfallAppState>,
) -> Result<Json<Vec<RainfallEntryDto>>, ApiError> {
    let entries = state.rainfall_service.list().await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/data",
    tag = "Rainfall",
    request_body = CreateRainfallRequest,
    responses(
        (status = 201, description = "Entry created", body = RainfallEntryDto),
        (status = 400, description = "Year already recorded", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Admin access required", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_entry(
    State(state): State<RainfallAppState>,
    ValidatedJson(request): ValidatedJson<CreateRainfallRequest>,
) -> Result<(StatusCode, Json<RainfallEntryDto>), ApiError> {
    let entry = state
        .rainfall_service
        .add(request.year, request.amount)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[utoipa::path(
    put,
    path = "/data/{id}",
    tag = "Rainfall",
    params(("id" = i32, Path, description = "Entry ID")),
    request_body = UpdateRainfallRequest,
    responses(
        (status = 200, description = "Entry updated", body = RainfallEntryDto),
        (status = 400, description = "Year already recorded", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Admin access required", body = ErrorBody),
        (status = 404, description = "Entry not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_entry(
    State(state): State<RainfallAppState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRainfallRequest>,
) -> Result<Json<RainfallEntryDto>, ApiError> {
    let entry = state
        .rainfall_service
        .update(id, request.into())
        .await?;

    Ok(Json(entry.into()))
}

#[utoipa::path(
    delete,
    path = "/data/{id}",
    tag = "Rainfall",
    params(("id" = i32, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Admin access required", body = ErrorBody),
        (status = 404, description = "Entry not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_entry(
    State(state): State<RainfallAppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.rainfall_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Data deleted successfully")))
}
