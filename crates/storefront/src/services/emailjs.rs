//! EmailJS client for order submission.
//!
//! Completed orders are relayed as a single templated message through the
//! EmailJS REST API. The relay reports success with HTTP 200; anything else
//! leaves the order unsubmitted and the cart untouched.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use deepvault_core::Cart;

use crate::config::EmailJsConfig;
use crate::models::{DeliveryDetails, PaymentMethod};

/// EmailJS send endpoint.
const API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Errors that can occur when relaying an order.
#[derive(Debug, Error)]
pub enum EmailJsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay answered with a non-200 status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Decide the relay outcome from a response status.
///
/// Only exactly 200 counts as sent; anything else (including other 2xx)
/// fails with the relay's body as the message.
fn relay_outcome(status: u16, message: String) -> Result<(), EmailJsError> {
    if status == 200 {
        Ok(())
    } else {
        Err(EmailJsError::Api { status, message })
    }
}

/// Template parameters for the order message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderDetails {
    pub payment_method: String,
    pub total_amount: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub message: String,
    pub subject: String,
}

impl OrderDetails {
    /// Package a cart and checkout state into template parameters.
    #[must_use]
    pub fn new(cart: &Cart, method: PaymentMethod, delivery: &DeliveryDetails) -> Self {
        let total = cart.total().display();

        Self {
            payment_method: method.label().to_string(),
            total_amount: total.clone(),
            customer_phone: delivery.phone_number.clone(),
            delivery_address: delivery.address.clone(),
            message: order_summary(cart),
            subject: format!("New Order - {total} - {}", delivery.phone_number),
        }
    }
}

/// One line per cart item: `<name> (x<quantity>) - <formatted price>`.
fn order_summary(cart: &Cart) -> String {
    cart.items()
        .iter()
        .map(|item| {
            format!(
                "{} (x{}) - {}",
                item.name,
                item.quantity,
                item.price.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Request envelope for the EmailJS REST API.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a OrderDetails,
}

/// Client for the EmailJS order relay.
#[derive(Clone)]
pub struct EmailJsClient {
    client: reqwest::Client,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsClient {
    /// Create a new EmailJS client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &EmailJsConfig) -> Result<Self, EmailJsError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
        })
    }

    /// Send an order through the relay.
    ///
    /// Succeeds only on a 200 response; the caller clears the cart on
    /// success and leaves everything untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the relay answers non-200.
    #[instrument(skip(self, order), fields(total = %order.total_amount))]
    pub async fn send_order(&self, order: &OrderDetails) -> Result<(), EmailJsError> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: order,
        };

        let response = self.client.post(API_URL).json(&body).send().await?;
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();

        relay_outcome(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepvault_core::{Price, ProductId};
    use rust_decimal::Decimal;

    fn price(n: i64) -> Price {
        Price::new(Decimal::from(n))
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), "Lamp", price(1000), "a.jpg");
        cart.add(ProductId::new(1), "Lamp", price(1000), "a.jpg");
        cart.add(ProductId::new(2), "Chair", price(2500), "b.jpg");
        cart
    }

    fn delivery() -> DeliveryDetails {
        DeliveryDetails {
            phone_number: "555".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_order_summary_lines() {
        let summary = order_summary(&sample_cart());
        assert_eq!(summary, "Lamp (x2) - ₦1,000\nChair (x1) - ₦2,500");
    }

    #[test]
    fn test_order_summary_empty_cart() {
        assert_eq!(order_summary(&Cart::new()), "");
    }

    #[test]
    fn test_order_details_packaging() {
        let order = OrderDetails::new(&sample_cart(), PaymentMethod::Btc, &delivery());

        assert_eq!(order.payment_method, "BTC");
        assert_eq!(order.total_amount, "₦4,500");
        assert_eq!(order.customer_phone, "555");
        assert_eq!(order.delivery_address, "1 Main St");
        assert_eq!(order.subject, "New Order - ₦4,500 - 555");
        assert!(order.message.contains("Lamp (x2)"));
    }

    #[test]
    fn test_relay_accepts_only_status_200() {
        assert!(relay_outcome(200, String::new()).is_ok());

        let err = relay_outcome(202, "queued".to_string()).expect_err("non-200 must fail");
        assert!(matches!(err, EmailJsError::Api { status: 202, .. }));

        let err = relay_outcome(500, "relay down".to_string()).expect_err("5xx must fail");
        assert!(matches!(err, EmailJsError::Api { status: 500, .. }));
    }

    #[test]
    fn test_send_request_serialization() {
        let order = OrderDetails::new(&sample_cart(), PaymentMethod::BankTransfer, &delivery());
        let body = SendRequest {
            service_id: "service_x",
            template_id: "template_y",
            user_id: "key_z",
            template_params: &order,
        };

        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["service_id"], "service_x");
        assert_eq!(json["template_id"], "template_y");
        assert_eq!(json["user_id"], "key_z");
        assert_eq!(json["template_params"]["payment_method"], "Bank Transfer");
    }
}
