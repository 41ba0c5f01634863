//! JSONBin document-store client.
//!
//! The storefront has no backend of its own: the product catalog and the
//! payment details live in two hosted JSONBin bins, read with a static
//! `X-Master-Key` credential. Nothing is ever written back.
//!
//! # Architecture
//!
//! - `reqwest` client with the credential in default headers
//! - Catalog responses cached in-memory via `moka` (short TTL) so repeated
//!   page loads share one fetch
//! - Payment details fetched per checkout render, never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use deepvault_storefront::jsonbin::JsonBinClient;
//!
//! let client = JsonBinClient::new(&config.jsonbin)?;
//! let products = client.get_catalog().await?;
//! let payment = client.get_payment_info().await?;
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::JsonBinClient;
pub use conversions::{PLACEHOLDER_IMAGE, normalize_products};
pub use types::{BankDetails, PaymentInfo, Product};

use thiserror::Error;

/// Errors that can occur when reading from the document store.
#[derive(Debug, Error)]
pub enum JsonBinError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The bin exists but its record is not shaped as expected.
    #[error("Malformed record: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonbin_error_display() {
        let err = JsonBinError::Api {
            status: 401,
            message: "invalid master key".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - invalid master key");

        let err = JsonBinError::Malformed("payment record is empty".to_string());
        assert_eq!(err.to_string(), "Malformed record: payment record is empty");
    }
}
