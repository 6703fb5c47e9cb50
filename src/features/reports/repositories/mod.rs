//! Persistence for incident reports.
//!
//! [`ReportRepository`] is the store contract; [`PgReportRepository`] backs it
//! with PostgreSQL and [`InMemoryReportRepository`] with a locked vector.

mod in_memory_report_repository;
mod pg_report_repository;
mod report_repository;

pub use in_memory_report_repository::InMemoryReportRepository;
pub use pg_report_repository::PgReportRepository;
pub use report_repository::ReportRepository;
