//! Payment gateway bridge.
//!
//! The adoption flow takes payment on the client through Razorpay checkout.
//! The API only creates the order and checks the signature the checkout hands
//! back. Marking a request as paid is a separate status update.
//!
//! # API Reference
//!
//! - Base URL: `https://api.razorpay.com/v1`
//! - Authentication: HTTP basic auth with key id and key secret
//! - Amounts are integers in the currency's minor unit

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use pet_adoption_core::Fee;

use crate::config::PaymentConfig;

/// Razorpay orders endpoint.
const ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// Currency used when the client does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the gateway response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The order amount cannot be charged.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Key id or secret missing outside demo mode.
    #[error("payment gateway is not configured")]
    NotConfigured,

    /// Checkout signature does not match.
    #[error("payment signature mismatch")]
    SignatureMismatch,
}

/// Order creation input.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    /// Amount in major units.
    pub amount: Fee,
    /// ISO currency code.
    #[serde(default)]
    pub currency: Option<String>,
    /// Merchant receipt reference.
    #[serde(default)]
    pub receipt: Option<String>,
    /// Free-form key/value notes forwarded to the gateway.
    #[serde(default)]
    pub notes: Option<serde_json::Map<String, serde_json::Value>>,
}

/// An order as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    /// Amount in minor units.
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Values handed back by the checkout widget after a successful payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a serde_json::Map<String, serde_json::Value>>,
}

/// Payment gateway capabilities used by the adoption flow.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for `request.amount`.
    async fn create_order(&self, request: OrderRequest) -> Result<PaymentOrder, PaymentError>;

    /// Check the checkout signature for an order/payment pair.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::SignatureMismatch` if the signature is not ours.
    fn verify_signature(&self, verification: &PaymentVerification) -> Result<(), PaymentError>;
}

/// Razorpay gateway client.
pub struct RazorpayGateway {
    client: reqwest::Client,
    key_id: String,
    key_secret: SecretString,
    demo_mode: bool,
}

impl RazorpayGateway {
    /// Create a new Razorpay client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        if config.demo_mode {
            tracing::warn!("Payment gateway running in demo mode, signatures are not checked");
        }

        Ok(Self {
            client,
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            demo_mode: config.demo_mode,
        })
    }

    fn is_configured(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.expose_secret().is_empty()
    }

    async fn parse_error(response: reqwest::Response) -> PaymentError {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: ErrorDetail,
        }
        #[derive(Deserialize)]
        struct ErrorDetail {
            description: String,
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error.description)
            .unwrap_or(text);

        PaymentError::Api { status, message }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<PaymentOrder, PaymentError> {
        let amount = request
            .amount
            .to_minor_units()
            .map_err(|e| PaymentError::InvalidAmount(e.to_string()))?;
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount(
                "amount must be greater than zero".to_owned(),
            ));
        }

        let currency = request
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_uppercase();
        let receipt = request
            .receipt
            .clone()
            .unwrap_or_else(|| format!("receipt_{}", Utc::now().timestamp_millis()));

        if self.demo_mode {
            let order = PaymentOrder {
                id: format!("order_demo_{}", uuid::Uuid::new_v4().simple()),
                amount,
                currency,
                receipt: Some(receipt),
                status: Some("created".to_owned()),
            };
            tracing::info!(order_id = %order.id, amount, "Demo payment order created");
            return Ok(order);
        }

        if !self.is_configured() {
            return Err(PaymentError::NotConfigured);
        }

        let body = CreateOrderBody {
            amount,
            currency: &currency,
            receipt: &receipt,
            notes: request.notes.as_ref(),
        };
        let response = self
            .client
            .post(ORDERS_URL)
            .basic_auth(&self.key_id, Some(self.key_secret.expose_secret()))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        let order: PaymentOrder = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(format!("Failed to parse order: {e}")))?;

        tracing::info!(order_id = %order.id, amount, currency = %order.currency, "Payment order created");
        Ok(order)
    }

    fn verify_signature(&self, verification: &PaymentVerification) -> Result<(), PaymentError> {
        if self.demo_mode {
            tracing::warn!(
                order_id = %verification.razorpay_order_id,
                "Skipping signature check in demo mode"
            );
            return Ok(());
        }

        verify_checkout_signature(
            self.key_secret.expose_secret(),
            &verification.razorpay_order_id,
            &verification.razorpay_payment_id,
            &verification.razorpay_signature,
        )
    }
}

/// Check a checkout signature: hex HMAC-SHA256 of `order_id|payment_id`.
///
/// The comparison is constant time.
///
/// # Errors
///
/// Returns `PaymentError::SignatureMismatch` for any signature other than the
/// expected one, including signatures that are not valid hex.
pub fn verify_checkout_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), PaymentError> {
    let provided = hex::decode(signature.trim()).map_err(|_| PaymentError::SignatureMismatch)?;
    let mut mac = Hmac::<Sha256>::new_from_slice(key_secret.as_bytes())
        .map_err(|_| PaymentError::SignatureMismatch)?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    mac.verify_slice(&provided)
        .map_err(|_| PaymentError::SignatureMismatch)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{order_id}|{payment_id}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn gateway(demo_mode: bool) -> RazorpayGateway {
        RazorpayGateway::new(&PaymentConfig {
            key_id: "rzp_test_key".to_owned(),
            key_secret: SecretString::from("shh".to_owned()),
            demo_mode,
        })
        .unwrap()
    }

    #[test]
    fn test_valid_signature_accepted() {
        let sig = sign("shh", "order_1", "pay_1");
        assert!(verify_checkout_signature("shh", "order_1", "pay_1", &sig).is_ok());
    }

    #[test]
    fn test_other_signatures_rejected() {
        let sig = sign("shh", "order_1", "pay_1");
        for (secret, order, payment, signature) in [
            ("other", "order_1", "pay_1", sig.as_str()),
            ("shh", "order_2", "pay_1", sig.as_str()),
            ("shh", "order_1", "pay_2", sig.as_str()),
            ("shh", "order_1", "pay_1", "not-hex"),
            ("shh", "order_1", "pay_1", ""),
        ] {
            assert!(matches!(
                verify_checkout_signature(secret, order, payment, signature),
                Err(PaymentError::SignatureMismatch)
            ));
        }
    }

    #[test]
    fn test_gateway_checks_signature_outside_demo_mode() {
        let gw = gateway(false);
        let good = PaymentVerification {
            razorpay_order_id: "order_1".to_owned(),
            razorpay_payment_id: "pay_1".to_owned(),
            razorpay_signature: sign("shh", "order_1", "pay_1"),
        };
        assert!(gw.verify_signature(&good).is_ok());

        let bad = PaymentVerification {
            razorpay_signature: "00".repeat(32),
            ..good
        };
        assert!(gw.verify_signature(&bad).is_err());
        assert!(gateway(true).verify_signature(&bad).is_ok());
    }

    #[tokio::test]
    async fn test_demo_order() {
        let order = gateway(true)
            .create_order(OrderRequest {
                amount: Fee::from_major(250),
                currency: None,
                receipt: None,
                notes: None,
            })
            .await
            .unwrap();
        assert!(order.id.starts_with("order_demo_"));
        assert_eq!(order.amount, 25_000);
        assert_eq!(order.currency, "INR");
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let err = gateway(true)
            .create_order(OrderRequest {
                amount: Fee::ZERO,
                currency: None,
                receipt: None,
                notes: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount(_)));
    }
}
