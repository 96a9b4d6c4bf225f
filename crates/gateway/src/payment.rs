//! Payment provider client. The provider holds funds; this service only
//! opens a payment session and records the resulting payment id.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::GatewayError;

const RAZORPAY_ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// An open payment session the frontend hands to the provider's widget.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    /// Provider-side order id, distinct from the link id.
    pub order_id: String,
    /// Amount in minor currency units (paise for INR).
    pub amount_minor: i64,
    pub currency: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a session for `amount_minor` of `currency`, tagged with
    /// `receipt` for provider-side reconciliation.
    async fn create_session(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentSession, GatewayError>;
}

pub struct RazorpayGateway {
    key_id: String,
    key_secret: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct RazorpayOrder {
    id: String,
    amount: i64,
    currency: String,
}

impl RazorpayGateway {
    pub fn new(key_id: String, key_secret: String, http: reqwest::Client) -> Self {
        Self {
            key_id,
            key_secret,
            http,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_session(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentSession, GatewayError> {
        if amount_minor <= 0 {
            return Err(GatewayError::Input(format!(
                "non-positive amount: {amount_minor}"
            )));
        }
        let body = json!({
            "amount": amount_minor,
            "currency": currency,
            "receipt": receipt,
        });
        let response = self
            .http
            .post(RAZORPAY_ORDERS_URL)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }
        let order: RazorpayOrder = response.json().await?;
        tracing::info!(order_id = %order.id, amount = order.amount, "Opened payment session");
        Ok(PaymentSession {
            order_id: order.id,
            amount_minor: order.amount,
            currency: order.currency,
        })
    }
}
