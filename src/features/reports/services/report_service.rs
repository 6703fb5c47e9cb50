use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::config::MailConfig;
use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::ReportResponseDto;
use crate::features::reports::models::{today, NewReport, Report};
use crate::features::reports::repositories::ReportRepository;
use crate::features::reports::services::render_summary_html;
use crate::modules::mail::{Mailer, OutgoingEmail};

/// Where the incident summary goes and how it is titled
#[derive(Debug, Clone)]
pub struct ReportMailSettings {
    pub recipient: String,
    pub subject_prefix: String,
}

impl From<&MailConfig> for ReportMailSettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            recipient: config.safety_recipient.clone(),
            subject_prefix: config.subject_prefix.clone(),
        }
    }
}

/// What `send_reports_email` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailSummaryOutcome {
    /// No reports stored; the mailer was not contacted
    Skipped,
    Sent {
        recipient: String,
        report_count: usize,
    },
}

/// Service for incident report operations
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    mailer: Arc<dyn Mailer>,
    mail: ReportMailSettings,
}

fn into_dtos(reports: Vec<Report>) -> Vec<ReportResponseDto> {
    reports.into_iter().map(ReportResponseDto::from).collect()
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        mailer: Arc<dyn Mailer>,
        mail: ReportMailSettings,
    ) -> Self {
        Self {
            repository,
            mailer,
            mail,
        }
    }

    /// List every report in insertion order
    pub async fn list(&self) -> Result<Vec<ReportResponseDto>> {
        Ok(into_dtos(self.repository.find_all().await?))
    }

    /// Get a report by id
    pub async fn get(&self, id: i64) -> Result<ReportResponseDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(ReportResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Reporte {} no encontrado", id)))
    }

    /// Persist a validated report
    pub async fn create(&self, report: NewReport) -> Result<ReportResponseDto> {
        let created = self.repository.create(report).await?;

        tracing::info!(
            "Report created: id={}, area={}, incident_type={}",
            created.id,
            created.area,
            created.incident_type
        );

        Ok(created.into())
    }

    /// Delete a report. Deleting an unknown id succeeds without doing anything.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repository.delete_by_id(id).await? {
            tracing::info!("Report deleted: id={}", id);
        } else {
            tracing::debug!("Delete requested for missing report: id={}", id);
        }
        Ok(())
    }

    pub async fn list_by_area(&self, area: &str) -> Result<Vec<ReportResponseDto>> {
        Ok(into_dtos(self.repository.find_by_area(area).await?))
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<ReportResponseDto>> {
        Ok(into_dtos(self.repository.find_by_date(date).await?))
    }

    pub async fn list_by_incident_type(
        &self,
        incident_type: &str,
    ) -> Result<Vec<ReportResponseDto>> {
        Ok(into_dtos(
            self.repository.find_by_incident_type(incident_type).await?,
        ))
    }

    pub async fn search_by_worker_name(&self, fragment: &str) -> Result<Vec<ReportResponseDto>> {
        Ok(into_dtos(
            self.repository
                .find_by_worker_name_containing(fragment)
                .await?,
        ))
    }

    /// Reports dated within `[start, end]`
    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ReportResponseDto>> {
        if start > end {
            return Err(AppError::validation(
                "La fecha de inicio no puede ser posterior a la fecha de fin",
            ));
        }
        Ok(into_dtos(
            self.repository.find_by_date_between(start, end).await?,
        ))
    }

    /// Email every stored report to the safety recipient as an HTML table.
    ///
    /// Does nothing when there are no reports. A delivery failure is returned
    /// as `AppError::MailDelivery`; there is no retry.
    pub async fn send_reports_email(&self) -> Result<EmailSummaryOutcome> {
        let reports = self.repository.find_all().await?;
        if reports.is_empty() {
            tracing::info!("No reports stored, summary email skipped");
            return Ok(EmailSummaryOutcome::Skipped);
        }

        let html_body = render_summary_html(&self.mail.subject_prefix, &reports)?;
        let email = OutgoingEmail {
            to: self.mail.recipient.clone(),
            subject: format!("{} - {}", self.mail.subject_prefix, today()),
            html_body,
        };

        self.mailer.send(email).await?;

        tracing::info!(
            "Summary email sent: recipient={}, reports={}",
            self.mail.recipient,
            reports.len()
        );

        Ok(EmailSummaryOutcome::Sent {
            recipient: self.mail.recipient.clone(),
            report_count: reports.len(),
        })
    }
}
