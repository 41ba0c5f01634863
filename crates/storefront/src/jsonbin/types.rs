//! Wire and domain types for the document store.

use serde::Deserialize;

use deepvault_core::{Price, ProductId};

/// Envelope around every bin read: the payload lives under `record`.
#[derive(Debug, Deserialize)]
pub struct BinResponse<T> {
    pub record: T,
}

/// A catalog record as stored in the bin.
///
/// Older records carry a single `image`; newer ones carry an ordered
/// `images` list. Normalization collapses both shapes into [`Product`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawProductRecord {
    pub id: i64,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

/// A normalized catalog product.
///
/// Immutable once built: created by normalization right after the catalog
/// fetch resolves and replaced wholesale by the next fetch. `images` is
/// always non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub images: Vec<String>,
    pub description: String,
}

impl Product {
    /// The representative (first) image.
    #[must_use]
    pub fn first_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }
}

/// Payment details as stored in the payment bin (`record[0]`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInfo {
    pub bank_details: BankDetails,
    pub btc_address: String,
}

/// Bank transfer details.
#[derive(Debug, Clone, Deserialize)]
pub struct BankDetails {
    pub account_number: String,
    pub bank_name: String,
}
