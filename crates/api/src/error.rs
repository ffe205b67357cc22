//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use msb_shared::AppError;
use serde_json::json;
use tracing::warn;

/// An [`AppError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!(code = self.0.error_code(), error = %self.0, "Request failed");

        let body = match self.0 {
            AppError::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            AppError::Validation(message) | AppError::ExternalService(message) => {
                json!({ "success": false, "error": message })
            }
            AppError::Internal(_) => json!({ "success": false, "error": "Internal server error" }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_method_not_allowed_body() {
        let (status, body) = render(AppError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }

    #[rstest]
    #[case(AppError::Validation("bad body".into()), StatusCode::BAD_REQUEST, "bad body")]
    #[case(
        AppError::ExternalService("Failed to send email".into()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to send email"
    )]
    #[case(
        AppError::Internal("db exploded".into()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error"
    )]
    #[tokio::test]
    async fn test_error_bodies(
        #[case] err: AppError,
        #[case] status: StatusCode,
        #[case] message: &str,
    ) {
        let (actual, body) = render(err).await;
        assert_eq!(actual, status);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], message);
    }
}
