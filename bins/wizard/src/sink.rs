//! Delivery through the report server's submit endpoint.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use msb_api::routes::submit::SubmissionRequest;
use msb_core::delivery::{DeliveryError, Notification, NotificationSink};
use tracing::{debug, warn};

/// Posts reports to `POST /api/submit-report`.
pub struct HttpSubmissionSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionSink {
    /// Creates a sink for the given endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl NotificationSink for HttpSubmissionSink {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        let now = Local::now();
        let request = SubmissionRequest::for_report(
            notification.report.clone(),
            now.format("%-m/%-d/%Y").to_string(),
            now.format("%-I:%M:%S %p").to_string(),
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "Submit request failed");
                DeliveryError::SinkDeliveryFailed(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(endpoint = %self.endpoint, %status, "Report accepted");
            Ok(())
        } else {
            warn!(endpoint = %self.endpoint, %status, "Report rejected");
            Err(DeliveryError::SinkDeliveryFailed(format!(
                "Server error: {}",
                status.as_u16()
            )))
        }
    }
}
