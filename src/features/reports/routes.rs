use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;
use crate::shared::constants::MAX_REPORT_BODY_SIZE;

/// Create routes for the incident reports feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reportes",
            // Inline base64 photos exceed the default body limit
            get(handlers::list_reports)
                .post(handlers::create_report)
                .layer(DefaultBodyLimit::max(MAX_REPORT_BODY_SIZE)),
        )
        .route("/api/reportes/send-email", post(handlers::send_reports_email))
        .route(
            "/api/reportes/area/{area}",
            get(handlers::list_reports_by_area),
        )
        .route(
            "/api/reportes/date/{date}",
            get(handlers::list_reports_by_date),
        )
        .route(
            "/api/reportes/incident-type/{incident_type}",
            get(handlers::list_reports_by_incident_type),
        )
        .route("/api/reportes/worker", get(handlers::search_reports_by_worker))
        .route(
            "/api/reportes/date-range",
            get(handlers::list_reports_by_date_range),
        )
        .route(
            "/api/reportes/{id}",
            get(handlers::get_report).delete(handlers::delete_report),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::ReportResponseDto;
    use crate::features::reports::models::today;
    use crate::features::reports::repositories::InMemoryReportRepository;
    use crate::shared::test_helpers::{
        mail_settings, report_service, test_server, FailingMailer, RecordingMailer,
        TEST_RECIPIENT,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> (
        TestServer,
        Arc<InMemoryReportRepository>,
        Arc<RecordingMailer>,
    ) {
        let (service, repository, mailer) = report_service();
        (test_server(routes(service)), repository, mailer)
    }

    fn report_body(worker_name: &str, area: &str, date: &str) -> Value {
        json!({
            "date": date,
            "workerName": worker_name,
            "area": area,
            "incidentType": "Caída",
            "description": "Resbaló en la escalera",
        })
    }

    async fn create(server: &TestServer, body: Value) -> ReportResponseDto {
        let response = server.post("/api/reportes").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        response.json::<ReportResponseDto>()
    }

    #[tokio::test]
    async fn test_create_get_delete_lifecycle() {
        let (server, _, _) = server();

        let mut body = report_body("Ana Torres", "Acería", "2024-05-10");
        body["photoBase64"] = json!("aGVsbG8gd29ybGQ=");
        let response = server.post("/api/reportes").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["id"].as_i64().expect("generated id");
        assert_eq!(created["createdAt"], today().to_string());

        let response = server.get(&format!("/api/reportes/{}", id)).await;
        response.assert_status_ok();
        let fetched: Value = response.json();
        assert_eq!(fetched["date"], "2024-05-10");
        assert_eq!(fetched["workerName"], "Ana Torres");
        assert_eq!(fetched["area"], "Acería");
        assert_eq!(fetched["incidentType"], "Caída");
        assert_eq!(fetched["description"], "Resbaló en la escalera");
        assert_eq!(fetched["photoBase64"], "aGVsbG8gd29ybGQ=");

        server
            .delete(&format!("/api/reportes/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/reportes/{}", id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_create_without_photo_returns_null_photo() {
        let (server, _, _) = server();
        let created = create(&server, report_body("Ana", "Acería", "2024-05-10")).await;

        let response = server.get(&format!("/api/reportes/{}", created.id)).await;

        response.assert_status_ok();
        let fetched: Value = response.json();
        assert!(fetched["photoBase64"].is_null());
    }

    #[tokio::test]
    async fn test_create_accepts_multi_megabyte_photo() {
        let (server, repository, _) = server();
        let photo = "A".repeat(3 * 1024 * 1024);
        let mut body = report_body("Ana", "Acería", "2024-05-10");
        body["photoBase64"] = json!(&photo);

        let response = server.post("/api/reportes").json(&body).await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(repository.count().await, 1);
        let created: ReportResponseDto = response.json();
        assert_eq!(created.photo_base64.map(|p| p.len()), Some(photo.len()));
    }

    #[tokio::test]
    async fn test_create_with_blank_field_is_rejected_without_write() {
        let (server, repository, _) = server();

        let response = server
            .post("/api/reportes")
            .json(&report_body("   ", "Acería", "2024-05-10"))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["errors"],
            json!(["El nombre del trabajador es requerido"])
        );
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_create_without_date_is_rejected() {
        let (server, repository, _) = server();
        let mut body = report_body("Ana", "Acería", "2024-05-10");
        body.as_object_mut().unwrap().remove("date");

        server
            .post("/api/reportes")
            .json(&body)
            .await
            .assert_status_bad_request();
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_create_with_malformed_json_is_bad_request() {
        let (server, repository, _) = server();

        server
            .post("/api/reportes")
            .text("{not json")
            .content_type("application/json")
            .await
            .assert_status_bad_request();
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_list_all_starts_empty() {
        let (server, _, _) = server();

        let response = server.get("/api/reportes").await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_no_content() {
        let (server, repository, _) = server();
        create(&server, report_body("Ana", "Acería", "2024-05-10")).await;

        server
            .delete("/api/reportes/9999")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(repository.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_with_non_numeric_id_is_bad_request() {
        let (server, _, _) = server();

        server
            .get("/api/reportes/abc")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_list_by_area() {
        let (server, _, _) = server();
        create(&server, report_body("Ana", "Acería", "2024-05-10")).await;
        create(&server, report_body("Luis", "Laminación", "2024-05-10")).await;

        let reports: Vec<ReportResponseDto> =
            server.get("/api/reportes/area/Acer%C3%ADa").await.json();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].worker_name, "Ana");
    }

    #[tokio::test]
    async fn test_filters_by_date_type_worker_and_range() {
        let (server, _, _) = server();
        create(&server, report_body("Ana Torres", "Acería", "2024-05-09")).await;
        create(&server, report_body("Mariana Ruiz", "Acería", "2024-05-10")).await;
        let mut burn = report_body("Jose Perez", "Acería", "2024-05-21");
        burn["incidentType"] = json!("Quemadura");
        create(&server, burn).await;

        let by_date: Vec<ReportResponseDto> =
            server.get("/api/reportes/date/2024-05-10").await.json();
        assert_eq!(by_date.len(), 1);

        let by_type: Vec<ReportResponseDto> = server
            .get("/api/reportes/incident-type/Quemadura")
            .await
            .json();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].worker_name, "Jose Perez");

        let by_worker: Vec<ReportResponseDto> = server
            .get("/api/reportes/worker")
            .add_query_param("name", "ana")
            .await
            .json();
        let names: Vec<&str> = by_worker.iter().map(|r| r.worker_name.as_str()).collect();
        assert_eq!(names, vec!["Ana Torres", "Mariana Ruiz"]);

        let in_range: Vec<ReportResponseDto> = server
            .get("/api/reportes/date-range")
            .add_query_param("start", "2024-05-10")
            .add_query_param("end", "2024-05-20")
            .await
            .json();
        assert_eq!(in_range.len(), 1);
        assert_eq!(in_range[0].worker_name, "Mariana Ruiz");
    }

    #[tokio::test]
    async fn test_bad_filter_inputs_are_rejected() {
        let (server, _, _) = server();

        server
            .get("/api/reportes/date/10-05-2024")
            .await
            .assert_status_bad_request();
        server
            .get("/api/reportes/worker")
            .await
            .assert_status_bad_request();
        server
            .get("/api/reportes/date-range")
            .add_query_param("start", "2024-05-20")
            .add_query_param("end", "2024-05-10")
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_send_email_without_reports_does_not_contact_mailer() {
        let (server, _, mailer) = server();

        let response = server.post("/api/reportes/send-email").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["sent"], false);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_send_email_confirms_delivery() {
        let (server, _, mailer) = server();
        create(&server, report_body("Ana", "Acería", "2024-05-10")).await;

        let response = server.post("/api/reportes/send-email").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Reportes enviados por correo exitosamente");
        assert_eq!(body["data"]["recipient"], TEST_RECIPIENT);
        assert_eq!(body["data"]["reportCount"], 1);
        assert_eq!(mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_send_email_failure_is_server_error_with_cause() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let service = Arc::new(ReportService::new(
            repository,
            Arc::new(FailingMailer::new("relay unreachable")),
            mail_settings(),
        ));
        let server = test_server(routes(service));
        create(&server, report_body("Ana", "Acería", "2024-05-10")).await;

        let response = server.post("/api/reportes/send-email").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        let message = body["message"].as_str().unwrap();
        assert!(message.starts_with("Error al enviar el correo"));
        assert!(message.contains("relay unreachable"));
    }
}
