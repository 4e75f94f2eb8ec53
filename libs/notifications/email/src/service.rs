use crate::error::{NotificationError, NotificationResult};
use crate::models::Email;
use crate::provider::EmailProvider;
use crate::templates::{self, TemplateEngine};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;

/// High-level mailer for the booking flow.
///
/// Renders a template and hands it to the configured provider. Callers fire
/// these from spawned tasks; a send failure is theirs to log, not to
/// propagate.
#[derive(Clone)]
pub struct Mailer {
    provider: Arc<dyn EmailProvider>,
    templates: Arc<TemplateEngine>,
}

impl Mailer {
    pub fn new(provider: Arc<dyn EmailProvider>) -> NotificationResult<Self> {
        Ok(Self {
            provider,
            templates: Arc::new(TemplateEngine::new()?),
        })
    }

    /// Hold-placed notification with the payment deadline
    pub async fn send_reservation_held(
        &self,
        to: &str,
        name: &str,
        booth_number: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> NotificationResult<()> {
        let data = json!({
            "name": name,
            "booth_number": booth_number,
            "expires_at": expires_at.map(|e| e.format("%H:%M UTC on %Y-%m-%d").to_string()),
        });
        self.send_templated(to, templates::RESERVATION_HELD, &data)
            .await
    }

    /// Payment-succeeded notification
    pub async fn send_booking_confirmed(
        &self,
        to: &str,
        name: &str,
        booth_number: &str,
    ) -> NotificationResult<()> {
        let data = json!({ "name": name, "booth_number": booth_number });
        self.send_templated(to, templates::BOOKING_CONFIRMED, &data)
            .await
    }

    /// Invoice-settled notification
    pub async fn send_invoice_paid(
        &self,
        to: &str,
        name: &str,
        invoice_number: &str,
        total_cents: i64,
    ) -> NotificationResult<()> {
        let data = json!({
            "name": name,
            "invoice_number": invoice_number,
            "total": format!("${:.2}", total_cents as f64 / 100.0),
        });
        self.send_templated(to, templates::INVOICE_PAID, &data).await
    }

    async fn send_templated(
        &self,
        to: &str,
        template: &str,
        data: &serde_json::Value,
    ) -> NotificationResult<()> {
        if to.is_empty() || !to.contains('@') {
            return Err(NotificationError::InvalidRecipient(to.to_string()));
        }

        let rendered = self.templates.render(template, data)?;
        let email = Email::new(to, rendered.subject)
            .with_text(rendered.body_text)
            .with_html(rendered.body_html);

        self.provider
            .send(&email)
            .await
            .map_err(|e| NotificationError::Provider(e.to_string()))?;

        tracing::debug!(to = %to, template = %template, "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockEmailProvider;

    #[tokio::test]
    async fn reservation_held_email_reaches_provider() {
        let provider = Arc::new(MockEmailProvider::new());
        let mailer = Mailer::new(provider.clone()).unwrap();

        mailer
            .send_reservation_held("ex@example.com", "Ada", "A-01", Some(Utc::now()))
            .await
            .unwrap();

        assert!(provider.was_sent_to("ex@example.com").await);
        let sent = provider.sent_emails().await;
        assert!(sent[0].subject.contains("A-01"));
    }

    #[tokio::test]
    async fn invalid_recipient_is_rejected_before_sending() {
        let provider = Arc::new(MockEmailProvider::new());
        let mailer = Mailer::new(provider.clone()).unwrap();

        let err = mailer
            .send_booking_confirmed("not-an-address", "Ada", "A-01")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::InvalidRecipient(_)));
        assert_eq!(provider.sent_count().await, 0);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_provider_error() {
        let provider = Arc::new(MockEmailProvider::failing("smtp down"));
        let mailer = Mailer::new(provider).unwrap();

        let err = mailer
            .send_booking_confirmed("ex@example.com", "Ada", "A-01")
            .await
            .unwrap_err();

        assert!(matches!(err, NotificationError::Provider(_)));
    }
}
