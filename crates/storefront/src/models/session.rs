//! Session-stored state.
//!
//! The session is the device-scoped key-value store: it owns the cart for
//! the session's lifetime and keeps the delivery details across visits.

/// Session keys for storefront state.
pub mod keys {
    /// Key for the serialized cart.
    pub const CART: &str = "cart";

    /// Key for the persisted delivery details.
    pub const DELIVERY_DETAILS: &str = "delivery_details";

    /// Key for the selected payment method.
    pub const PAYMENT_METHOD: &str = "payment_method";
}
