use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::AppError;
use crate::features::reports::models::{NewReport, Report};
use crate::shared::validation::NOT_BLANK_REGEX;

/// Request DTO for creating an incident report
///
/// `id` and `createdAt` are assigned by the server; if a client sends them
/// they are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    /// Calendar date of the incident (YYYY-MM-DD)
    #[validate(required(message = "La fecha es requerida"))]
    pub date: Option<NaiveDate>,

    #[validate(
        required(message = "El nombre del trabajador es requerido"),
        regex(path = *NOT_BLANK_REGEX, message = "El nombre del trabajador es requerido")
    )]
    pub worker_name: Option<String>,

    /// Zone or department where the incident happened
    #[validate(
        required(message = "La zona es requerida"),
        regex(path = *NOT_BLANK_REGEX, message = "La zona es requerida")
    )]
    pub area: Option<String>,

    #[validate(
        required(message = "El tipo de incidente es requerido"),
        regex(path = *NOT_BLANK_REGEX, message = "El tipo de incidente es requerido")
    )]
    pub incident_type: Option<String>,

    #[validate(
        required(message = "La descripción es requerida"),
        regex(path = *NOT_BLANK_REGEX, message = "La descripción es requerida")
    )]
    pub description: Option<String>,

    /// Optional base64-encoded photo, stored as-is
    pub photo_base64: Option<String>,
}

impl TryFrom<CreateReportDto> for NewReport {
    type Error = AppError;

    fn try_from(dto: CreateReportDto) -> Result<Self, Self::Error> {
        dto.validate()?;

        match (
            dto.date,
            dto.worker_name,
            dto.area,
            dto.incident_type,
            dto.description,
        ) {
            (Some(date), Some(worker_name), Some(area), Some(incident_type), Some(description)) => {
                Ok(NewReport {
                    date,
                    worker_name,
                    area,
                    incident_type,
                    description,
                    photo_base64: dto.photo_base64,
                })
            }
            _ => Err(AppError::validation("Faltan campos requeridos")),
        }
    }
}

/// Response DTO for an incident report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: i64,
    pub date: NaiveDate,
    pub worker_name: String,
    pub area: String,
    pub incident_type: String,
    pub description: String,
    pub photo_base64: Option<String>,
    pub created_at: NaiveDate,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            date: r.date,
            worker_name: r.worker_name,
            area: r.area,
            incident_type: r.incident_type,
            description: r.description,
            photo_base64: r.photo_base64,
            created_at: r.created_at,
        }
    }
}

/// Query params for searching by worker name
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkerSearchQuery {
    /// Case-insensitive substring of the worker name
    pub name: String,
}

/// Query params for an inclusive date range
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// First day of the range (inclusive, YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last day of the range (inclusive, YYYY-MM-DD)
    pub end: NaiveDate,
}

/// Result of the summary email operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponseDto {
    /// False when there were no reports and nothing was sent
    pub sent: bool,
    pub recipient: Option<String>,
    pub report_count: usize,
}
