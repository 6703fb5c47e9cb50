//! Outbound document templates (currently the incident summary email).

pub mod engine;

pub use engine::{render_template, TemplateError};
