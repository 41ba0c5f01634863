//! Home page route handler.
//!
//! The home page is the whole store: it loads the catalog, renders the
//! product grid, and hosts the cart panel and product dialog containers
//! that the HTMX fragments swap into.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::jsonbin::Product;
use crate::state::AppState;

/// Product display data for the grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i64,
    pub name: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            price: product.price.display(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
}

/// Full-page error template shown when the catalog cannot be loaded.
#[derive(Template, WebTemplate)]
#[template(path = "home_error.html")]
pub struct HomeErrorTemplate {}

/// Display the home page.
///
/// Catalog load failure blocks the whole page with a retry affordance;
/// an empty catalog renders the empty state inside the normal shell.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    match state.jsonbin().get_catalog().await {
        Ok(products) => {
            let products = products.iter().map(ProductCardView::from).collect();
            HomeTemplate { products }.into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch catalog: {e}");
            HomeErrorTemplate {}.into_response()
        }
    }
}
