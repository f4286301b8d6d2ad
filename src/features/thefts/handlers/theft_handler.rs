use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::thefts::dtos::{
    SubmitTheftDto, SubmitTheftResponseDto, TheftReportResponseDto,
};
use crate::features::thefts::models::NewTheftReport;
use crate::features::thefts::services::TheftService;
use crate::shared::constants::REPORT_STORED_MESSAGE;

/// Report a bicycle theft
///
/// Coordinates are validated before anything is stored. The report stays in
/// the active set until `expira`.
#[utoipa::path(
    post,
    path = "/robo",
    request_body = SubmitTheftDto,
    responses(
        (status = 200, description = "Report stored", body = SubmitTheftResponseDto),
        (status = 400, description = "Missing or non-finite coordinates", body = crate::shared::types::ErrorResponse),
        (status = 500, description = "Storage unavailable", body = crate::shared::types::ErrorResponse)
    ),
    tag = "thefts"
)]
pub async fn submit_theft(
    State(service): State<Arc<TheftService>>,
    AppJson(dto): AppJson<SubmitTheftDto>,
) -> Result<Json<SubmitTheftResponseDto>> {
    let report = NewTheftReport::try_from(dto)?;

    let stored = service.submit(report).await?;
    Ok(Json(SubmitTheftResponseDto {
        mensaje: REPORT_STORED_MESSAGE.to_string(),
        expira: stored.expires_at,
        fotos_guardadas: stored.photo_urls.len(),
    }))
}

/// List active red zones
///
/// Returns every report that has not expired yet, most recent first.
#[utoipa::path(
    get,
    path = "/zonas-rojas",
    responses(
        (status = 200, description = "Active theft reports", body = Vec<TheftReportResponseDto>),
        (status = 500, description = "Storage unavailable", body = crate::shared::types::ErrorResponse)
    ),
    tag = "thefts"
)]
pub async fn list_active_zones(
    State(service): State<Arc<TheftService>>,
) -> Result<Json<Vec<TheftReportResponseDto>>> {
    let reports = service.list_active().await?;
    Ok(Json(reports.into_iter().map(Into::into).collect()))
}
