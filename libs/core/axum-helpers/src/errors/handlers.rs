use axum::response::Response;

use super::AppError;

/// Fallback for routes that do not exist.
pub async fn not_found() -> Response {
    use axum::response::IntoResponse;

    AppError::NotFound("The requested resource was not found".to_string()).into_response()
}
