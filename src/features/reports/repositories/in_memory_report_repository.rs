use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::ReportRepository;
use crate::core::error::Result;
use crate::features::reports::models::{today, NewReport, Report};

#[derive(Default)]
struct State {
    last_id: i64,
    reports: Vec<Report>,
}

/// Process-local report store for development runs and tests.
///
/// Ids are never reused, even after deletes.
#[derive(Default)]
pub struct InMemoryReportRepository {
    state: RwLock<State>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports
    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.state.read().await.reports.len()
    }

    async fn filter<F>(&self, predicate: F) -> Vec<Report>
    where
        F: Fn(&Report) -> bool,
    {
        self.state
            .read()
            .await
            .reports
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: NewReport) -> Result<Report> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let stored = report.into_report(state.last_id, today());
        state.reports.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self) -> Result<Vec<Report>> {
        Ok(self.state.read().await.reports.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        Ok(self
            .state
            .read()
            .await
            .reports
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.reports.len();
        state.reports.retain(|r| r.id != id);
        Ok(state.reports.len() < before)
    }

    async fn find_by_area(&self, area: &str) -> Result<Vec<Report>> {
        Ok(self.filter(|r| r.area == area).await)
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Report>> {
        Ok(self.filter(|r| r.date == date).await)
    }

    async fn find_by_incident_type(&self, incident_type: &str) -> Result<Vec<Report>> {
        Ok(self.filter(|r| r.incident_type == incident_type).await)
    }

    async fn find_by_worker_name_containing(&self, fragment: &str) -> Result<Vec<Report>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .filter(|r| r.worker_name.to_lowercase().contains(&needle))
            .await)
    }

    async fn find_by_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Report>> {
        Ok(self.filter(|r| r.date >= start && r.date <= end).await)
    }
}
