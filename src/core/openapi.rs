use utoipa::{Modify, OpenApi};

use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::delete_report,
        reports_handlers::send_reports_email,
        reports_handlers::list_reports_by_area,
        reports_handlers::list_reports_by_date,
        reports_handlers::list_reports_by_incident_type,
        reports_handlers::search_reports_by_worker,
        reports_handlers::list_reports_by_date_range,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_dtos::CreateReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::SendEmailResponseDto,
            ApiResponse<reports_dtos::SendEmailResponseDto>,
        )
    ),
    tags(
        (name = "reportes", description = "Safety incident reports"),
    ),
    info(
        title = "SIDERPERU Incidents API",
        version = "1.0",
        description = "API para gestión de incidentes de seguridad de SIDERPERU",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/reportes",
            "/api/reportes/{id}",
            "/api/reportes/send-email",
            "/api/reportes/area/{area}",
            "/api/reportes/date-range",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9".to_string(),
            description: "desc".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9");
    }
}
