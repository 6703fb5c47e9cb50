mod report_service;
mod summary_email;

pub use report_service::{EmailSummaryOutcome, ReportMailSettings, ReportService};
pub use summary_email::render_summary_html;
