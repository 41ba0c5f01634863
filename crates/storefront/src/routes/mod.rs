//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (catalog grid + cart panel)
//! GET  /health                 - Health check
//!
//! # Products (HTMX fragments)
//! GET  /products/{id}          - Product detail dialog
//! GET  /products/{id}/image    - Image carousel frame
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel (items + checkout section)
//! POST /cart/add               - Add to cart (triggers cart-updated)
//! POST /cart/update            - Set line quantity
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout (HTMX fragments)
//! POST /checkout/method        - Select payment method
//! POST /checkout/method/clear  - Back to method chooser
//! GET  /checkout/confirm       - Delivery details form
//! POST /checkout/details       - Persist delivery details on change
//! POST /checkout/submit        - Validate and relay the order
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/image", get(products::image))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/method", post(checkout::select_method))
        .route("/method/clear", post(checkout::clear_method))
        .route("/confirm", get(checkout::confirm))
        .route("/details", post(checkout::save_details))
        .route("/submit", post(checkout::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout routes
        .nest("/checkout", checkout_routes())
}
