//! Checkout route handlers.
//!
//! The checkout lives inside the cart panel: choose a payment method, see
//! the bank or BTC details, confirm the payment was made, then enter
//! delivery details and submit. The order is only ever submitted with both
//! a recorded payment method and complete delivery details; a failed
//! submission leaves the cart and the form untouched for retry.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use deepvault_core::Cart;

use crate::models::{DeliveryDetails, PaymentMethod, session_keys};
use crate::routes::cart::{get_cart, save_cart};
use crate::services::{EmailJsError, OrderDetails};
use crate::state::AppState;

/// Checkout display data for templates.
///
/// Flattened for template consumption: when no payment method is selected
/// the chooser renders; otherwise the selected method's details render,
/// empty (with a notice) if the payment info fetch failed.
#[derive(Clone)]
pub struct CheckoutView {
    pub has_method: bool,
    pub is_bank: bool,
    pub is_btc: bool,
    pub method_label: String,
    pub bank_account: String,
    pub bank_name: String,
    pub btc_address: String,
    pub payment_info_error: bool,
}

impl CheckoutView {
    /// The initial state: no payment method selected.
    #[must_use]
    pub fn no_method() -> Self {
        Self {
            has_method: false,
            is_bank: false,
            is_btc: false,
            method_label: String::new(),
            bank_account: String::new(),
            bank_name: String::new(),
            btc_address: String::new(),
            payment_info_error: false,
        }
    }
}

/// Build the checkout view for the current session.
///
/// Payment details are fetched fresh whenever a method is selected; a fetch
/// failure is non-blocking - the checkout proceeds with empty fields and a
/// notice.
pub(crate) async fn build_checkout_view(state: &AppState, session: &Session) -> CheckoutView {
    let Some(method) = get_method(session).await else {
        return CheckoutView::no_method();
    };

    let mut view = CheckoutView {
        has_method: true,
        is_bank: method == PaymentMethod::BankTransfer,
        is_btc: method == PaymentMethod::Btc,
        method_label: method.label().to_string(),
        ..CheckoutView::no_method()
    };

    match state.jsonbin().get_payment_info().await {
        Ok(info) => {
            view.bank_account = info.bank_details.account_number;
            view.bank_name = info.bank_details.bank_name;
            view.btc_address = info.btc_address;
        }
        Err(e) => {
            tracing::warn!("Failed to fetch payment info: {e}");
            view.payment_info_error = true;
        }
    }

    view
}

/// Apply a relay attempt to the cart.
///
/// A sent order empties the cart and tells the caller to reset the payment
/// method; anything else leaves the cart untouched so the visitor can retry.
fn settle_submission(cart: &mut Cart, outcome: &Result<(), EmailJsError>) -> bool {
    if outcome.is_ok() {
        cart.clear();
        true
    } else {
        false
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn get_method(session: &Session) -> Option<PaymentMethod> {
    session
        .get::<PaymentMethod>(session_keys::PAYMENT_METHOD)
        .await
        .ok()
        .flatten()
}

async fn get_delivery_details(session: &Session) -> DeliveryDetails {
    session
        .get::<DeliveryDetails>(session_keys::DELIVERY_DETAILS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

async fn save_delivery_details(session: &Session, details: &DeliveryDetails) {
    if let Err(e) = session
        .insert(session_keys::DELIVERY_DETAILS, details)
        .await
    {
        tracing::error!("Failed to save delivery details to session: {e}");
    }
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Payment method selection form data.
#[derive(Debug, Deserialize)]
pub struct MethodForm {
    pub method: PaymentMethod,
}

/// Delivery details form data.
#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    pub phone_number: String,
    pub address: String,
}

impl DetailsForm {
    fn into_details(self) -> DeliveryDetails {
        DeliveryDetails {
            phone_number: self.phone_number.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

/// Checkout section fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_section.html")]
pub struct CheckoutSectionTemplate {
    pub checkout: CheckoutView,
}

/// Delivery details form fragment template.
///
/// `error` is empty on the happy path; a non-empty value renders as an
/// inline notice while the entered values stay in place.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/delivery_form.html")]
pub struct DeliveryFormTemplate {
    pub phone_number: String,
    pub address: String,
    pub error: String,
}

/// Order confirmation fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/submit_success.html")]
pub struct SubmitSuccessTemplate {}

// =============================================================================
// Handlers
// =============================================================================

/// Select a payment method (HTMX).
#[instrument(skip(state, session))]
pub async fn select_method(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MethodForm>,
) -> impl IntoResponse {
    if let Err(e) = session
        .insert(session_keys::PAYMENT_METHOD, form.method)
        .await
    {
        tracing::error!("Failed to save payment method to session: {e}");
    }

    CheckoutSectionTemplate {
        checkout: build_checkout_view(&state, &session).await,
    }
}

/// Reset the payment method back to the chooser (HTMX).
#[instrument(skip(session))]
pub async fn clear_method(session: Session) -> impl IntoResponse {
    if let Err(e) = session
        .remove::<PaymentMethod>(session_keys::PAYMENT_METHOD)
        .await
    {
        tracing::error!("Failed to clear payment method from session: {e}");
    }

    CheckoutSectionTemplate {
        checkout: CheckoutView::no_method(),
    }
}

/// Delivery details form, prefilled from the session (HTMX).
#[instrument(skip(session))]
pub async fn confirm(session: Session) -> impl IntoResponse {
    let details = get_delivery_details(&session).await;

    DeliveryFormTemplate {
        phone_number: details.phone_number,
        address: details.address,
        error: String::new(),
    }
}

/// Persist delivery details as they change (HTMX).
///
/// Fired on field change so a returning visitor finds the form prefilled.
#[instrument(skip(session, form))]
pub async fn save_details(session: Session, Form(form): Form<DetailsForm>) -> impl IntoResponse {
    save_delivery_details(&session, &form.into_details()).await;
    StatusCode::NO_CONTENT
}

/// Submit the order (HTMX).
///
/// Validates the invariant that an order carries both delivery details and
/// a payment method, relays it, and on success clears the cart and resets
/// the payment method. Any failure leaves cart and form state untouched.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<DetailsForm>,
) -> Response {
    let details = form.into_details();

    if !details.is_complete() {
        return DeliveryFormTemplate {
            phone_number: details.phone_number,
            address: details.address,
            error: "Please fill in all fields".to_string(),
        }
        .into_response();
    }

    // Details are persisted even if the submission below fails.
    save_delivery_details(&session, &details).await;

    let Some(method) = get_method(&session).await else {
        return DeliveryFormTemplate {
            phone_number: details.phone_number,
            address: details.address,
            error: "Choose a payment method first".to_string(),
        }
        .into_response();
    };

    let mut cart = get_cart(&session).await;
    if cart.is_empty() {
        return DeliveryFormTemplate {
            phone_number: details.phone_number,
            address: details.address,
            error: "Your cart is empty".to_string(),
        }
        .into_response();
    }

    let order = OrderDetails::new(&cart, method, &details);
    let outcome = state.emailjs().send_order(&order).await;

    if settle_submission(&mut cart, &outcome) {
        if let Err(e) = save_cart(&session, &cart).await {
            tracing::error!("Failed to save cleared cart to session: {e}");
        }
        if let Err(e) = session
            .remove::<PaymentMethod>(session_keys::PAYMENT_METHOD)
            .await
        {
            tracing::error!("Failed to reset payment method: {e}");
        }

        (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            SubmitSuccessTemplate {},
        )
            .into_response()
    } else {
        if let Err(e) = outcome {
            tracing::error!("Order submission failed: {e}");
        }
        DeliveryFormTemplate {
            phone_number: details.phone_number,
            address: details.address,
            error: "Failed to send order details. Please try again.".to_string(),
        }
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepvault_core::{Price, ProductId};
    use rust_decimal::Decimal;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            ProductId::new(1),
            "Lamp",
            Price::new(Decimal::from(1000)),
            "a.jpg",
        );
        cart
    }

    #[test]
    fn test_sent_order_clears_cart_and_resets_method() {
        let mut cart = sample_cart();

        assert!(settle_submission(&mut cart, &Ok(())));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_failed_order_leaves_cart_untouched() {
        let mut cart = sample_cart();
        let outcome = Err(EmailJsError::Api {
            status: 500,
            message: "relay down".to_string(),
        });

        assert!(!settle_submission(&mut cart, &outcome));
        assert_eq!(cart.len(), 1);
    }
}
