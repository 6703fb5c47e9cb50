/// Column headers of the incident summary email, in display order
pub const EMAIL_TABLE_HEADERS: [&str; 5] = ["Fecha", "Trabajador", "Zona", "Tipo", "Descripción"];

/// Confirmation returned when the summary email was delivered
pub const MSG_EMAIL_SENT: &str = "Reportes enviados por correo exitosamente";

/// Returned when there was nothing to send
pub const MSG_EMAIL_SKIPPED: &str = "No hay reportes para enviar";

/// Upper bound for a create-report request body. Photos travel inline as
/// base64, so this sits well above axum's 2 MB default.
pub const MAX_REPORT_BODY_SIZE: usize = 50 * 1024 * 1024;
