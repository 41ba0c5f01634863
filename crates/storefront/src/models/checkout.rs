//! Checkout flow types.

use serde::{Deserialize, Serialize};

/// The two supported payment methods.
///
/// Selecting a method is a plain field set; there is no validation beyond
/// it being one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Btc,
}

impl PaymentMethod {
    /// Human-readable label used in templates and the order message.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BankTransfer => "Bank Transfer",
            Self::Btc => "BTC",
        }
    }
}

/// Delivery details collected at confirmation time.
///
/// Persisted to the device session on every change so a returning visitor
/// does not re-enter them. Both fields must be non-empty before an order
/// can be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub phone_number: String,
    pub address: String,
}

impl DeliveryDetails {
    /// Whether both fields are filled in (after trimming).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.phone_number.trim().is_empty() && !self.address.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::BankTransfer.label(), "Bank Transfer");
        assert_eq!(PaymentMethod::Btc.label(), "BTC");
    }

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).expect("serialize");
        assert_eq!(json, "\"bank_transfer\"");
        let back: PaymentMethod = serde_json::from_str("\"btc\"").expect("deserialize");
        assert_eq!(back, PaymentMethod::Btc);
    }

    #[test]
    fn test_delivery_details_completeness() {
        let complete = DeliveryDetails {
            phone_number: "555".to_string(),
            address: "1 Main St".to_string(),
        };
        assert!(complete.is_complete());

        let missing_phone = DeliveryDetails {
            phone_number: "  ".to_string(),
            address: "1 Main St".to_string(),
        };
        assert!(!missing_phone.is_complete());

        assert!(!DeliveryDetails::default().is_complete());
    }

    #[test]
    fn test_delivery_details_roundtrip() {
        // Details written to the session must come back identical.
        let details = DeliveryDetails {
            phone_number: "555".to_string(),
            address: "1 Main St".to_string(),
        };
        let json = serde_json::to_string(&details).expect("serialize");
        let back: DeliveryDetails = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, details);
    }
}
