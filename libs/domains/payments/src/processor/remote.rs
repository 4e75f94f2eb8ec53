//! HTTP client for a Stripe-style remote payment processor

use super::{IntentStatus, PaymentProcessor, ProcessorError, ProcessorIntent, ProcessorResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Remote processor configuration
#[derive(Clone, Debug)]
pub struct RemoteProcessorConfig {
    /// API base URL, e.g. `https://api.processor.example`
    pub base_url: String,
    /// Secret API key, sent as a bearer token
    pub secret_key: String,
}

/// Reqwest-backed processor client
pub struct RemoteProcessor {
    http: reqwest::Client,
    config: RemoteProcessorConfig,
}

#[derive(Debug, Deserialize)]
struct RemoteCustomer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RemoteIntent {
    id: String,
    client_secret: Option<String>,
    status: String,
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct RemoteRefund {
    id: String,
}

impl RemoteProcessor {
    pub fn new(config: RemoteProcessorConfig) -> ProcessorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .map_err(|e| ProcessorError::Unreachable(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> ProcessorResult<T> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.config.secret_key)
            .form(form)
            .send()
            .await
            .map_err(|e| ProcessorError::Unreachable(e.to_string()))?;

        Self::parse(response).await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> ProcessorResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await
            .map_err(|e| ProcessorError::Unreachable(e.to_string()))?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ProcessorResult<T> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProcessorError::UnknownIntent("not found".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessorError::Rejected(format!("{}: {}", status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProcessorError::Rejected(format!("invalid response body: {}", e)))
    }

    fn map_status(status: &str) -> IntentStatus {
        match status {
            "succeeded" => IntentStatus::Succeeded,
            "processing" => IntentStatus::Processing,
            "canceled" => IntentStatus::Canceled,
            "payment_failed" | "failed" => IntentStatus::Failed,
            // requires_payment_method / requires_confirmation / requires_action
            _ => IntentStatus::RequiresPayment,
        }
    }

    fn from_remote(intent: RemoteIntent) -> ProcessorIntent {
        ProcessorIntent {
            status: Self::map_status(&intent.status),
            id: intent.id,
            client_secret: intent.client_secret,
            amount_cents: intent.amount,
            currency: intent.currency,
        }
    }
}

#[async_trait]
impl PaymentProcessor for RemoteProcessor {
    async fn create_customer(&self, email: &str, name: &str) -> ProcessorResult<String> {
        let customer: RemoteCustomer = self
            .post_form(
                "v1/customers",
                &[("email", email.to_string()), ("name", name.to_string())],
            )
            .await?;
        Ok(customer.id)
    }

    async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        metadata: &serde_json::Value,
    ) -> ProcessorResult<ProcessorIntent> {
        let mut form = vec![
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
        ];
        if let Some(object) = metadata.as_object() {
            for (key, value) in object {
                form.push(("metadata", format!("{}={}", key, value)));
            }
        }

        let intent: RemoteIntent = self.post_form("v1/payment_intents", &form).await?;
        Ok(Self::from_remote(intent))
    }

    async fn retrieve_intent(&self, intent_id: &str) -> ProcessorResult<ProcessorIntent> {
        let intent: RemoteIntent = self
            .get(&format!("v1/payment_intents/{}", intent_id))
            .await?;
        Ok(Self::from_remote(intent))
    }

    async fn refund_intent(&self, intent_id: &str) -> ProcessorResult<String> {
        let refund: RemoteRefund = self
            .post_form(
                "v1/refunds",
                &[("payment_intent", intent_id.to_string())],
            )
            .await?;
        Ok(refund.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_processor_vocabulary() {
        assert_eq!(RemoteProcessor::map_status("succeeded"), IntentStatus::Succeeded);
        assert_eq!(RemoteProcessor::map_status("canceled"), IntentStatus::Canceled);
        assert_eq!(RemoteProcessor::map_status("payment_failed"), IntentStatus::Failed);
        assert_eq!(
            RemoteProcessor::map_status("requires_payment_method"),
            IntentStatus::RequiresPayment
        );
    }
}
