use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::ReportRepository;
use crate::core::error::{AppError, Result};
use crate::features::reports::models::{today, NewReport, Report};

/// PostgreSQL-backed report store
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::Database(e)
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn create(&self, report: NewReport) -> Result<Report> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (date, worker_name, area, incident_type, description, photo_data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, date, worker_name, area, incident_type, description, photo_data, created_at
            "#,
        )
        .bind(report.date)
        .bind(&report.worker_name)
        .bind(&report.area)
        .bind(&report.incident_type)
        .bind(&report.description)
        .bind(&report.photo_base64)
        .bind(today())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create report"))
    }

    async fn find_all(&self) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reports"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get report by id"))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete report"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_area(&self, area: &str) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            WHERE area = $1
            ORDER BY id
            "#,
        )
        .bind(area)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reports by area"))
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            WHERE date = $1
            ORDER BY id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reports by date"))
    }

    async fn find_by_incident_type(&self, incident_type: &str) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            WHERE incident_type = $1
            ORDER BY id
            "#,
        )
        .bind(incident_type)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reports by incident type"))
    }

    async fn find_by_worker_name_containing(&self, fragment: &str) -> Result<Vec<Report>> {
        // STRPOS keeps '%' and '_' literal, unlike ILIKE
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            WHERE STRPOS(LOWER(worker_name), LOWER($1)) > 0
            ORDER BY id
            "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to search reports by worker name"))
    }

    async fn find_by_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Report>> {
        sqlx::query_as::<_, Report>(
            r#"
            SELECT id, date, worker_name, area, incident_type, description, photo_data, created_at
            FROM reports
            WHERE date BETWEEN $1 AND $2
            ORDER BY id
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list reports by date range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::count_error_events;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_store_failure_is_logged_once() {
        let errors = count_error_events(|| {
            let err = db_error("Failed to list reports")(sqlx::Error::RowNotFound);
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        });

        assert_eq!(errors, 1);
    }
}
