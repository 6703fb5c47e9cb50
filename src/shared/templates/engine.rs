//! Template engine for outbound documents using Jinja2 syntax.
//!
//! Templates live under `templates/` and are embedded into the binary at
//! compile time, so rendering never touches the filesystem.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Embedded templates as (name, source) pairs
const TEMPLATES: &[(&str, &str)] = &[(
    "email/report_summary.html.jinja",
    include_str!("../../../templates/email/report_summary.html.jinja"),
)];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    // Every template here produces HTML; values are always escaped
    env.set_auto_escape_callback(|_| AutoEscape::Html);

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render an embedded template with any serializable context.
///
/// # Example
/// ```ignore
/// use minijinja::context;
/// use crate::shared::templates::render_template;
///
/// let html = render_template(
///     "email/report_summary.html.jinja",
///     context! { title => "Resumen", headers => ["Fecha"], rows => Vec::<()>::new() },
/// )?;
/// ```
pub fn render_template<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
