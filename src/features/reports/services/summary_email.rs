use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::Report;
use crate::shared::constants::EMAIL_TABLE_HEADERS;
use crate::shared::templates::render_template;

const SUMMARY_TEMPLATE: &str = "email/report_summary.html.jinja";

#[derive(Serialize)]
struct SummaryRow<'a> {
    date: String,
    worker_name: &'a str,
    area: &'a str,
    incident_type: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Report> for SummaryRow<'a> {
    fn from(r: &'a Report) -> Self {
        Self {
            date: r.date.to_string(),
            worker_name: &r.worker_name,
            area: &r.area,
            incident_type: &r.incident_type,
            description: &r.description,
        }
    }
}

#[derive(Serialize)]
struct SummaryContext<'a> {
    title: &'a str,
    headers: &'a [&'a str],
    rows: Vec<SummaryRow<'a>>,
}

/// Render the incident summary: a heading plus one table row per report,
/// in the order given. Report text is HTML-escaped.
pub fn render_summary_html(title: &str, reports: &[Report]) -> Result<String> {
    let ctx = SummaryContext {
        title,
        headers: &EMAIL_TABLE_HEADERS,
        rows: reports.iter().map(SummaryRow::from).collect(),
    };

    render_template(SUMMARY_TEMPLATE, ctx)
        .map_err(|e| AppError::Internal(format!("Failed to render summary email: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{date, new_report};

    fn stored(id: i64, day: u32, worker: &str, area: &str) -> Report {
        new_report(worker, area, date(2024, 5, day)).into_report(id, date(2024, 6, 1))
    }

    #[test]
    fn test_header_row_columns_in_order() {
        let html = render_summary_html("Reporte", &[stored(1, 1, "Ana", "Acería")]).unwrap();

        let header_row =
            "<tr><th>Fecha</th><th>Trabajador</th><th>Zona</th><th>Tipo</th><th>Descripción</th></tr>";
        assert!(html.contains(header_row));
        assert!(html.contains("<h2>Reporte</h2>"));
    }

    #[test]
    fn test_one_data_row_per_report_in_order() {
        let reports = vec![
            stored(1, 1, "Ana Torres", "Acería"),
            stored(2, 2, "Luis Vega", "Laminación"),
            stored(3, 3, "Mariana Ruiz", "Almacén"),
        ];

        let html = render_summary_html("Reporte", &reports).unwrap();

        assert_eq!(html.matches("<tr>").count(), reports.len() + 1);
        assert_eq!(html.matches("<td>").count(), reports.len() * 5);

        let first = html.find("Ana Torres").unwrap();
        let second = html.find("Luis Vega").unwrap();
        let third = html.find("Mariana Ruiz").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_row_cells_follow_column_order() {
        let report = stored(4, 4, "Ana Torres", "Acería");

        let html = render_summary_html("Reporte", &[report.clone()]).unwrap();

        let expected = format!(
            "<tr><td>2024-05-04</td><td>Ana Torres</td><td>Acería</td><td>{}</td><td>{}</td></tr>",
            report.incident_type, report.description
        );
        assert!(html.contains(&expected), "{}", html);
    }

    #[test]
    fn test_large_ids_render() {
        let html = render_summary_html("Reporte", &[stored(120, 31, "Ana", "Acería")]).unwrap();

        assert!(html.contains("<td>2024-05-31</td>"));
    }

    #[test]
    fn test_markup_in_report_text_is_escaped() {
        let mut report = stored(1, 1, "Ana", "Acería");
        report.description = "<script>alert(1)</script>".to_string();

        let html = render_summary_html("Reporte", &[report]).unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
