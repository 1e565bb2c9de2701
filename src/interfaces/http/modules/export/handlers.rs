//! CSV export handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::interfaces::http::common::error::ErrorBody;
use crate::interfaces::http::common::ApiError;
use crate::interfaces::http::modules::rainfall::RainfallAppState;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const CSV_DISPOSITION: &str = "attachment; filename=\"rainfall_data.csv\"";

#[utoipa::path(
    get,
    path = "/export",
    tag = "Rainfall",
    responses(
        (status = 200, description = "CSV attachment with Year,Amount rows", content_type = "text/csv", body = String),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn export_csv(State(state): State<RainfallAppState>) -> Result<Response, ApiError> {
    let csv = state.rainfall_service.export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, CSV_DISPOSITION),
        ],
        csv,
    )
        .into_response())
}
