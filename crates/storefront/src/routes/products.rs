//! Product route handlers: detail dialog and image carousel fragments.
//!
//! Each product card and the detail dialog carry an image frame fragment.
//! Navigation cycles through the product's images with wraparound; the
//! frame's controls target only the frame itself, so paging never triggers
//! the surrounding open-detail action.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use deepvault_core::ProductId;

use crate::error::{AppError, Result};
use crate::jsonbin::Product;
use crate::state::AppState;

// =============================================================================
// Carousel Index Math
// =============================================================================

/// Next image index, wrapping past the end.
#[must_use]
pub const fn next_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

/// Previous image index, wrapping before the start.
#[must_use]
pub const fn prev_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + len - 1) % len }
}

/// Clamp an arbitrary requested index into the image list.
#[must_use]
pub const fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index % len }
}

// =============================================================================
// Views and Templates
// =============================================================================

/// Image frame fragment template.
///
/// Used for both the grid card frame and the dialog frame; the two differ
/// only in which container the controls target and whether the frame links
/// through to the detail dialog.
#[derive(Template, WebTemplate)]
#[template(path = "partials/image_frame.html")]
pub struct ImageFrameTemplate {
    pub name: String,
    pub url: String,
    pub show_nav: bool,
    pub is_card: bool,
    pub next_url: String,
    pub prev_url: String,
    pub detail_url: String,
}

/// Thumbnail display data for the detail dialog.
#[derive(Clone)]
pub struct ThumbView {
    pub url: String,
    pub target_url: String,
    pub current: bool,
}

/// Product detail dialog template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_detail.html")]
pub struct ProductDetailTemplate {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub description: String,
    pub frame_url: String,
    pub thumbnails: Vec<ThumbView>,
}

/// Which frame a carousel request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Card,
    Dialog,
}

/// Navigation direction for carousel requests.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Next,
    Prev,
}

/// Query parameters for the image frame endpoint.
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub index: Option<usize>,
    pub dir: Option<NavDirection>,
    pub view: Option<FrameKind>,
}

/// Query parameters for the detail dialog.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Card image index at the moment the dialog was opened (one-way sync).
    pub image: Option<usize>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Find a product in the current catalog.
async fn find_product(state: &AppState, id: ProductId) -> Result<Product> {
    let catalog = state.jsonbin().get_catalog().await?;
    catalog
        .iter()
        .find(|product| product.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

fn image_frame(product: &Product, index: usize, kind: FrameKind) -> ImageFrameTemplate {
    let len = product.images.len();
    let index = clamp_index(index, len);
    let id = product.id.as_i64();
    let view = match kind {
        FrameKind::Card => "card",
        FrameKind::Dialog => "dialog",
    };

    ImageFrameTemplate {
        name: product.name.clone(),
        url: product
            .images
            .get(index)
            .cloned()
            .unwrap_or_default(),
        show_nav: len > 1,
        is_card: matches!(kind, FrameKind::Card),
        next_url: format!("/products/{id}/image?view={view}&index={index}&dir=next"),
        prev_url: format!("/products/{id}/image?view={view}&index={index}&dir=prev"),
        detail_url: format!("/products/{id}?image={index}"),
    }
}

/// Image carousel fragment.
///
/// `index` without `dir` sets the position directly (thumbnail click);
/// with `dir` it is the current position to page from.
#[instrument(skip(state))]
pub async fn image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ImageQuery>,
) -> Result<impl IntoResponse> {
    let product = find_product(&state, ProductId::new(id)).await?;
    let len = product.images.len();

    let current = clamp_index(query.index.unwrap_or(0), len);
    let index = match query.dir {
        Some(NavDirection::Next) => next_index(current, len),
        Some(NavDirection::Prev) => prev_index(current, len),
        None => current,
    };

    let kind = query.view.unwrap_or(FrameKind::Card);
    Ok(image_frame(&product, index, kind))
}

/// Product detail dialog fragment.
///
/// The dialog's image index starts from the card's current index; after
/// that the two navigate independently.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DetailQuery>,
) -> Result<impl IntoResponse> {
    let product = find_product(&state, ProductId::new(id)).await?;
    let len = product.images.len();
    let start = clamp_index(query.image.unwrap_or(0), len);

    let thumbnails = product
        .images
        .iter()
        .enumerate()
        .map(|(i, url)| ThumbView {
            url: url.clone(),
            target_url: format!("/products/{id}/image?view=dialog&index={i}"),
            current: i == start,
        })
        .collect();

    Ok(ProductDetailTemplate {
        id: product.id.as_i64(),
        name: product.name.clone(),
        price: product.price.display(),
        description: product.description.clone(),
        frame_url: format!("/products/{id}/image?view=dialog&index={start}"),
        thumbnails,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_around() {
        // Starting at 0 in a list of length 4, four steps return to 0.
        let mut index = 0;
        for _ in 0..4 {
            index = next_index(index, 4);
        }
        assert_eq!(index, 0);
    }

    #[test]
    fn test_prev_from_zero_wraps_to_last() {
        assert_eq!(prev_index(0, 4), 3);
    }

    #[test]
    fn test_next_then_prev_is_identity() {
        for start in 0..4 {
            assert_eq!(prev_index(next_index(start, 4), 4), start);
        }
    }

    #[test]
    fn test_single_image_is_fixed_point() {
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(prev_index(0, 1), 0);
    }

    #[test]
    fn test_empty_list_does_not_panic() {
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(prev_index(0, 0), 0);
        assert_eq!(clamp_index(5, 0), 0);
    }

    #[test]
    fn test_clamp_out_of_range_index() {
        assert_eq!(clamp_index(7, 4), 3);
        assert_eq!(clamp_index(2, 4), 2);
    }
}
