//! SMTP delivery through the shared email service.

use async_trait::async_trait;
use msb_shared::EmailService;
use tracing::error;

use super::sink::{DeliveryError, Notification, NotificationSink};

#[async_trait]
impl NotificationSink for EmailService {
    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.send_email(
            &notification.recipients,
            &notification.subject,
            &notification.body,
        )
        .await
        .map_err(|e| {
            error!(subject = %notification.subject, error = %e, "Email delivery failed");
            DeliveryError::SinkDeliveryFailed(e.to_string())
        })
    }
}
