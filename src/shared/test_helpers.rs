use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::NaiveDate;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::features::reports::models::NewReport;
use crate::features::reports::repositories::InMemoryReportRepository;
use crate::features::reports::services::{ReportMailSettings, ReportService};
use crate::modules::mail::{MailError, Mailer, OutgoingEmail};

pub const TEST_RECIPIENT: &str = "seguridad@example.com";
pub const TEST_SUBJECT_PREFIX: &str = "Reporte de Incidentes";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn new_report(worker_name: &str, area: &str, date: NaiveDate) -> NewReport {
    NewReport {
        date,
        worker_name: worker_name.to_string(),
        area: area.to_string(),
        incident_type: "Caída".to_string(),
        description: "Resbaló en la escalera".to_string(),
        photo_base64: None,
    }
}

pub fn test_server(router: Router) -> TestServer {
    TestServer::new(router).unwrap()
}

/// Mailer that keeps every email it is asked to send
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Mailer whose relay always refuses the message
pub struct FailingMailer {
    reason: String,
}

impl FailingMailer {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), MailError> {
        Err(MailError::Transport(self.reason.clone()))
    }
}

pub fn mail_settings() -> ReportMailSettings {
    ReportMailSettings {
        recipient: TEST_RECIPIENT.to_string(),
        subject_prefix: TEST_SUBJECT_PREFIX.to_string(),
    }
}

/// Report service over an empty in-memory store and a recording mailer
pub fn report_service() -> (
    Arc<ReportService>,
    Arc<InMemoryReportRepository>,
    Arc<RecordingMailer>,
) {
    let repository = Arc::new(InMemoryReportRepository::new());
    let mailer = Arc::new(RecordingMailer::default());
    let service = Arc::new(ReportService::new(
        repository.clone(),
        mailer.clone(),
        mail_settings(),
    ));
    (service, repository, mailer)
}

struct ErrorEventCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorEventCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` and return how many ERROR-level events it emitted
pub fn count_error_events<F: FnOnce()>(f: F) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorEventCounter(count.clone()));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}
