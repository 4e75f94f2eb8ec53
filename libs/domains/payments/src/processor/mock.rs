//! In-memory payment processor for development and testing

use super::{IntentStatus, PaymentProcessor, ProcessorError, ProcessorIntent, ProcessorResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Mock processor holding intents in memory.
///
/// Intents start in `requires_payment`; tests and the dev environment drive
/// them forward with the `mark_*` helpers.
#[derive(Clone, Default)]
pub struct MockProcessor {
    intents: Arc<Mutex<HashMap<String, ProcessorIntent>>>,
}

impl MockProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the cardholder completing payment
    pub async fn mark_succeeded(&self, intent_id: &str) {
        self.set_status(intent_id, IntentStatus::Succeeded).await;
    }

    /// Simulate a declined payment
    pub async fn mark_failed(&self, intent_id: &str) {
        self.set_status(intent_id, IntentStatus::Failed).await;
    }

    /// Simulate the cardholder abandoning the intent
    pub async fn mark_canceled(&self, intent_id: &str) {
        self.set_status(intent_id, IntentStatus::Canceled).await;
    }

    async fn set_status(&self, intent_id: &str, status: IntentStatus) {
        if let Some(intent) = self.intents.lock().await.get_mut(intent_id) {
            intent.status = status;
        }
    }
}

#[async_trait]
impl PaymentProcessor for MockProcessor {
    async fn create_customer(&self, email: &str, _name: &str) -> ProcessorResult<String> {
        let customer_id = format!("cus_mock_{}", Uuid::new_v4().simple());
        tracing::debug!(customer_id = %customer_id, email = %email, "Mock customer created");
        Ok(customer_id)
    }

    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        _metadata: &serde_json::Value,
    ) -> ProcessorResult<ProcessorIntent> {
        let id = format!("pi_mock_{}", Uuid::new_v4().simple());
        let intent = ProcessorIntent {
            id: id.clone(),
            client_secret: Some(format!("{}_secret_{}", id, Uuid::new_v4().simple())),
            status: IntentStatus::RequiresPayment,
            amount_cents,
            currency: currency.to_string(),
        };

        self.intents.lock().await.insert(id.clone(), intent.clone());
        tracing::debug!(intent_id = %id, amount_cents, "Mock payment intent created");
        Ok(intent)
    }

    async fn retrieve_intent(&self, intent_id: &str) -> ProcessorResult<ProcessorIntent> {
        self.intents
            .lock()
            .await
            .get(intent_id)
            .cloned()
            .ok_or_else(|| ProcessorError::UnknownIntent(intent_id.to_string()))
    }

    async fn refund_intent(&self, intent_id: &str) -> ProcessorResult<String> {
        let mut intents = self.intents.lock().await;
        let intent = intents
            .get_mut(intent_id)
            .ok_or_else(|| ProcessorError::UnknownIntent(intent_id.to_string()))?;

        if intent.status != IntentStatus::Succeeded {
            return Err(ProcessorError::Rejected(format!(
                "cannot refund intent in state {}",
                intent.status
            )));
        }

        let refund_id = format!("re_mock_{}", Uuid::new_v4().simple());
        tracing::info!(intent_id = %intent_id, refund_id = %refund_id, "Mock refund issued");
        Ok(refund_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn intent_round_trip() {
        let processor = MockProcessor::new();
        let intent = processor
            .create_intent(50_000, "usd", &serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(intent.status, IntentStatus::RequiresPayment);
        assert!(intent.client_secret.is_some());

        processor.mark_succeeded(&intent.id).await;
        let fetched = processor.retrieve_intent(&intent.id).await.unwrap();
        assert_eq!(fetched.status, IntentStatus::Succeeded);
    }

    #[tokio::test]
    async fn refund_requires_succeeded_intent() {
        let processor = MockProcessor::new();
        let intent = processor
            .create_intent(50_000, "usd", &serde_json::json!({}))
            .await
            .unwrap();

        assert!(processor.refund_intent(&intent.id).await.is_err());

        processor.mark_succeeded(&intent.id).await;
        let refund_id = processor.refund_intent(&intent.id).await.unwrap();
        assert!(refund_id.starts_with("re_mock_"));
    }

    #[tokio::test]
    async fn unknown_intent_errors() {
        let processor = MockProcessor::new();
        assert!(matches!(
            processor.retrieve_intent("pi_nope").await,
            Err(ProcessorError::UnknownIntent(_))
        ));
    }
}
