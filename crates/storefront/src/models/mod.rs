//! Domain models for the storefront.

pub mod checkout;
pub mod session;

pub use checkout::{DeliveryDetails, PaymentMethod};
pub use session::keys as session_keys;
