use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::reports::dtos::{
    CreateReportDto, DateRangeQuery, ReportResponseDto, SendEmailResponseDto, WorkerSearchQuery,
};
use crate::features::reports::models::NewReport;
use crate::features::reports::services::{EmailSummaryOutcome, ReportService};
use crate::shared::constants::{MSG_EMAIL_SENT, MSG_EMAIL_SKIPPED};
use crate::shared::types::ApiResponse;

/// Create a new incident report
///
/// `id` and `createdAt` are assigned by the server.
#[utoipa::path(
    post,
    path = "/api/reportes",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ReportResponseDto),
        (status = 400, description = "Missing or blank required fields")
    ),
    tag = "reportes"
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ReportResponseDto>)> {
    let new_report = NewReport::try_from(dto)?;
    let report = service.create(new_report).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// List all reports
#[utoipa::path(
    get,
    path = "/api/reportes",
    responses(
        (status = 200, description = "All reports", body = Vec<ReportResponseDto>)
    ),
    tag = "reportes"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.list().await?))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reportes/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ReportResponseDto),
        (status = 404, description = "Report not found")
    ),
    tag = "reportes"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ReportResponseDto>> {
    Ok(Json(service.get(id).await?))
}

/// Delete report by ID
///
/// Deleting an id that does not exist also answers 204.
#[utoipa::path(
    delete,
    path = "/api/reportes/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 204, description = "Report deleted")
    ),
    tag = "reportes"
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Email all reports to the safety team
#[utoipa::path(
    post,
    path = "/api/reportes/send-email",
    responses(
        (status = 200, description = "Email sent, or nothing to send", body = ApiResponse<SendEmailResponseDto>),
        (status = 500, description = "Mail delivery failed")
    ),
    tag = "reportes"
)]
pub async fn send_reports_email(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<SendEmailResponseDto>>> {
    let (dto, message) = match service.send_reports_email().await? {
        EmailSummaryOutcome::Skipped => (
            SendEmailResponseDto {
                sent: false,
                recipient: None,
                report_count: 0,
            },
            MSG_EMAIL_SKIPPED,
        ),
        EmailSummaryOutcome::Sent {
            recipient,
            report_count,
        } => (
            SendEmailResponseDto {
                sent: true,
                recipient: Some(recipient),
                report_count,
            },
            MSG_EMAIL_SENT,
        ),
    };

    Ok(Json(ApiResponse::success(
        Some(dto),
        Some(message.to_string()),
        None,
    )))
}

/// List reports for an area (exact match)
#[utoipa::path(
    get,
    path = "/api/reportes/area/{area}",
    params(
        ("area" = String, Path, description = "Zone or department")
    ),
    responses(
        (status = 200, description = "Reports in the area", body = Vec<ReportResponseDto>)
    ),
    tag = "reportes"
)]
pub async fn list_reports_by_area(
    State(service): State<Arc<ReportService>>,
    AppPath(area): AppPath<String>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.list_by_area(&area).await?))
}

/// List reports for an incident date
#[utoipa::path(
    get,
    path = "/api/reportes/date/{date}",
    params(
        ("date" = String, Path, description = "Incident date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Reports on that date", body = Vec<ReportResponseDto>),
        (status = 400, description = "Malformed date")
    ),
    tag = "reportes"
)]
pub async fn list_reports_by_date(
    State(service): State<Arc<ReportService>>,
    AppPath(date): AppPath<NaiveDate>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.list_by_date(date).await?))
}

/// List reports of an incident type (exact match)
#[utoipa::path(
    get,
    path = "/api/reportes/incident-type/{incident_type}",
    params(
        ("incident_type" = String, Path, description = "Incident category")
    ),
    responses(
        (status = 200, description = "Reports of that type", body = Vec<ReportResponseDto>)
    ),
    tag = "reportes"
)]
pub async fn list_reports_by_incident_type(
    State(service): State<Arc<ReportService>>,
    AppPath(incident_type): AppPath<String>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.list_by_incident_type(&incident_type).await?))
}

/// Search reports by worker name (case-insensitive substring)
#[utoipa::path(
    get,
    path = "/api/reportes/worker",
    params(WorkerSearchQuery),
    responses(
        (status = 200, description = "Matching reports", body = Vec<ReportResponseDto>),
        (status = 400, description = "Missing name")
    ),
    tag = "reportes"
)]
pub async fn search_reports_by_worker(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<WorkerSearchQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(service.search_by_worker_name(&query.name).await?))
}

/// List reports within an inclusive date range
#[utoipa::path(
    get,
    path = "/api/reportes/date-range",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Reports in range", body = Vec<ReportResponseDto>),
        (status = 400, description = "Missing, malformed or inverted bounds")
    ),
    tag = "reportes"
)]
pub async fn list_reports_by_date_range(
    State(service): State<Arc<ReportService>>,
    AppQuery(query): AppQuery<DateRangeQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    Ok(Json(
        service.list_by_date_range(query.start, query.end).await?,
    ))
}
