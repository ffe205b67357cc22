use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(AppError::MethodNotAllowed.status_code(), 405);
    assert_eq!(AppError::ExternalService("test".into()).status_code(), 500);
    assert_eq!(AppError::Internal("test".into()).status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(
        AppError::MethodNotAllowed.error_code(),
        "METHOD_NOT_ALLOWED"
    );
    assert_eq!(
        AppError::ExternalService("test".into()).error_code(),
        "EXTERNAL_SERVICE_ERROR"
    );
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_app_error_display() {
    assert_eq!(
        format!("{}", AppError::Validation("msg".into())),
        "Validation error: msg"
    );
    assert_eq!(
        format!("{}", AppError::MethodNotAllowed),
        "Method not allowed"
    );
    assert_eq!(
        format!("{}", AppError::ExternalService("msg".into())),
        "External service error: msg"
    );
    assert_eq!(
        format!("{}", AppError::Internal("msg".into())),
        "Internal error: msg"
    );
}
