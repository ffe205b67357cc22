//! Report submission endpoint.
//!
//! Receives a filing from the wizard and forwards it to the reviewers. The
//! notification body is rendered here from `report_data`, so the reviewers
//! always see the same text the wizard previewed.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use msb_core::delivery::Notification;
use msb_core::reports::SubmittedReport;
use msb_shared::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use tracing::{debug, error, info};

use crate::{AppState, error::ApiError};

/// Creates the submission route. Every method other than POST gets 405.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/submit-report",
        post(submit_report).fallback(method_not_allowed),
    )
}

/// Body posted by the wizard.
///
/// The flat fields mirror the header of the report for quick triage;
/// `report_data` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    /// Legal company name.
    #[serde(default)]
    pub company_name: String,
    /// DBA name or "None".
    #[serde(default)]
    pub dba_name: String,
    /// Contact person.
    #[serde(default)]
    pub contact_person: String,
    /// Quarter, e.g. "Q1".
    #[serde(default)]
    pub quarter: String,
    /// Year, sent as a string or a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    /// "Original Filing" or "Amendment".
    #[serde(default)]
    pub filing_type: String,
    /// Comma-separated service names.
    #[serde(default)]
    pub services: String,
    /// Client-local submission date.
    #[serde(default)]
    pub submission_date: String,
    /// Client-local submission time.
    #[serde(default)]
    pub submission_time: String,
    /// Subject line the client expects.
    #[serde(default)]
    pub email_subject: String,
    /// The submitted report.
    pub report_data: SubmittedReport,
}

impl SubmissionRequest {
    /// Builds the request the wizard sends for a report.
    #[must_use]
    pub fn for_report(
        report: SubmittedReport,
        submission_date: String,
        submission_time: String,
    ) -> Self {
        let notification = Notification::for_report(&report);
        let details = &report.report_details;
        let company = &report.company_info;
        Self {
            company_name: company.legal_name.clone(),
            dba_name: if company.dba.trim().is_empty() {
                "None".to_string()
            } else {
                company.dba.clone()
            },
            contact_person: company.contact_person.clone(),
            quarter: details.quarter.to_string(),
            year: details.year.to_string(),
            filing_type: details.filing_type.to_string(),
            services: report.services_display(),
            submission_date,
            submission_time,
            email_subject: notification.subject,
            report_data: report,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

async fn submit_report(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return ApiError::from(AppError::Validation(rejection.body_text())).into_response();
        }
    };

    let notification = Notification::for_report(&request.report_data);
    if !request.email_subject.is_empty() && request.email_subject != notification.subject {
        debug!(
            client_subject = %request.email_subject,
            subject = %notification.subject,
            "Client subject differs from report"
        );
    }

    info!(
        company = %request.company_name,
        quarter = %request.quarter,
        year = %request.year,
        filing_type = %request.filing_type,
        submitted = %format!("{} at {}", request.submission_date, request.submission_time),
        "Report submission received"
    );

    match state.sink.deliver(&notification).await {
        Ok(()) => {
            info!(subject = %notification.subject, "Report delivered to reviewers");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Report submitted successfully"
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, subject = %notification.subject, "Failed to deliver report");
            ApiError::from(AppError::ExternalService("Failed to send email".to_string()))
                .into_response()
        }
    }
}

async fn method_not_allowed() -> Response {
    ApiError::from(AppError::MethodNotAllowed).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use msb_core::delivery::{DeliveryError, NotificationSink};
    use msb_core::fiscal::Quarter;
    use msb_core::reports::{ReportDraft, ReportService, ServiceType};
    use rstest::rstest;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::create_router;

    #[derive(Default)]
    struct MockSink {
        fail: bool,
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl NotificationSink for MockSink {
        async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                Err(DeliveryError::SinkDeliveryFailed("relay refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn acme_report() -> SubmittedReport {
        let mut draft = ReportDraft::default();
        draft.legal_name = "Acme Cash LLC".to_string();
        draft.contact_person = "Jane Doe".to_string();
        draft.quarter = Some(Quarter::Q1);
        draft.year = Some(2024);
        draft.set_service(ServiceType::CheckCashing, true);
        let months = draft.check_cashing_mut().unwrap();
        months.month1.instruments = "10".to_string();
        months.month1.face_amount = "1000".to_string();
        draft
            .snapshot(Utc.with_ymd_and_hms(2024, 4, 10, 12, 0, 0).unwrap())
            .unwrap()
    }

    fn request_body() -> String {
        let request = SubmissionRequest::for_report(
            acme_report(),
            "4/10/2024".to_string(),
            "12:00:00 PM".to_string(),
        );
        serde_json::to_string(&request).unwrap()
    }

    async fn send(sink: Arc<MockSink>, method: &str, body: Body) -> (StatusCode, Value) {
        let app = create_router(AppState::new(sink));
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/submit-report")
                    .header("Content-Type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_submit_success() {
        let sink = Arc::new(MockSink::default());

        let (status, body) = send(sink.clone(), "POST", Body::from(request_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "message": "Report submitted successfully" })
        );

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].recipients,
            vec!["phil@complycheck.co", "luis@complycheck.co"]
        );
        assert_eq!(sent[0].subject, "MSB Quarterly Report - Acme Cash LLC - Q1 2024");
        assert_eq!(sent[0].body, ReportService::render_summary(&acme_report()));
    }

    #[tokio::test]
    async fn test_submit_sink_failure() {
        let sink = Arc::new(MockSink {
            fail: true,
            ..MockSink::default()
        });

        let (status, body) = send(sink, "POST", Body::from(request_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "error": "Failed to send email" })
        );
    }

    #[rstest]
    #[case("GET")]
    #[case("PUT")]
    #[case("DELETE")]
    #[tokio::test]
    async fn test_non_post_methods_rejected(#[case] method: &str) {
        let sink = Arc::new(MockSink::default());

        let (status, body) = send(sink.clone(), method, Body::empty()).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({ "error": "Method not allowed" }));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"company_name":"Acme Cash LLC"}"#)]
    #[tokio::test]
    async fn test_malformed_body_rejected(#[case] raw: &'static str) {
        let sink = Arc::new(MockSink::default());

        let (status, body) = send(sink.clone(), "POST", Body::from(raw)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_request_accepts_numeric_year() {
        let mut value: Value = serde_json::from_str(&request_body()).unwrap();
        value["year"] = json!(2024);
        value.as_object_mut().unwrap().remove("dba_name");

        let request: SubmissionRequest = serde_json::from_value(value).unwrap();

        assert_eq!(request.year, "2024");
        assert_eq!(request.dba_name, "");
        assert_eq!(request.report_data, acme_report());
    }

    #[test]
    fn test_request_for_report_fields() {
        let request = SubmissionRequest::for_report(
            acme_report(),
            "4/10/2024".to_string(),
            "12:00:00 PM".to_string(),
        );

        assert_eq!(request.company_name, "Acme Cash LLC");
        assert_eq!(request.dba_name, "None");
        assert_eq!(request.quarter, "Q1");
        assert_eq!(request.year, "2024");
        assert_eq!(request.filing_type, "Original Filing");
        assert_eq!(request.services, "Check Cashing");
        assert_eq!(
            request.email_subject,
            "MSB Quarterly Report - Acme Cash LLC - Q1 2024"
        );
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(AppState::new(Arc::new(MockSink::default())));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
    }
}
