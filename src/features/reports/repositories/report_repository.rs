use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::Result;
use crate::features::reports::models::{NewReport, Report};

/// Store contract for the `reports` table.
///
/// Every sequence is returned in insertion (id) order.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a new report, assigning its id and `created_at` (today).
    async fn create(&self, report: NewReport) -> Result<Report>;

    async fn find_all(&self) -> Result<Vec<Report>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>>;

    /// Hard delete. Returns whether a row was removed; a missing id is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<bool>;

    /// Exact, case-sensitive match
    async fn find_by_area(&self, area: &str) -> Result<Vec<Report>>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Report>>;

    /// Exact, case-sensitive match
    async fn find_by_incident_type(&self, incident_type: &str) -> Result<Vec<Report>>;

    /// Case-insensitive literal substring match on `worker_name`
    async fn find_by_worker_name_containing(&self, fragment: &str) -> Result<Vec<Report>>;

    /// Inclusive on both ends
    async fn find_by_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Report>>;
}
