//! Incident reports feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/reportes` | Create a report |
//! | GET | `/api/reportes` | List all reports |
//! | GET | `/api/reportes/{id}` | Get a report |
//! | DELETE | `/api/reportes/{id}` | Delete a report (idempotent) |
//! | POST | `/api/reportes/send-email` | Email all reports to the safety team |
//! | GET | `/api/reportes/area/{area}` | Reports for an area |
//! | GET | `/api/reportes/date/{date}` | Reports for a date |
//! | GET | `/api/reportes/incident-type/{incident_type}` | Reports of a type |
//! | GET | `/api/reportes/worker?name=` | Worker name search |
//! | GET | `/api/reportes/date-range?start=&end=` | Reports in a date range |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{InMemoryReportRepository, PgReportRepository, ReportRepository};
pub use services::{ReportMailSettings, ReportService};
