use chrono::{Local, NaiveDate};
use sqlx::FromRow;

/// Database model for an incident report
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Report {
    pub id: i64,
    pub date: NaiveDate,
    pub worker_name: String,
    pub area: String,
    pub incident_type: String,
    pub description: String,
    #[sqlx(rename = "photo_data")]
    pub photo_base64: Option<String>,
    pub created_at: NaiveDate,
}

/// Validated data for creating a new report.
///
/// The API layer builds this from a `CreateReportDto` only after validation,
/// so repositories never see blank required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub date: NaiveDate,
    pub worker_name: String,
    pub area: String,
    pub incident_type: String,
    pub description: String,
    pub photo_base64: Option<String>,
}

impl NewReport {
    /// Materialize the stored record once the repository has picked an id.
    pub fn into_report(self, id: i64, created_at: NaiveDate) -> Report {
        Report {
            id,
            date: self.date,
            worker_name: self.worker_name,
            area: self.area,
            incident_type: self.incident_type,
            description: self.description,
            photo_base64: self.photo_base64,
            created_at,
        }
    }
}

/// Current local calendar date, used for `created_at` and email subjects
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
