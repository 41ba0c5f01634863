//! Catalog normalization.
//!
//! Raw catalog records come in two shapes: a single `image` field (older
//! records) or an ordered `images` list (newer records). Every product
//! handed to the rest of the storefront has a non-empty `images` list.

use deepvault_core::ProductId;

use super::types::{Product, RawProductRecord};

/// Image substituted when a record carries neither `image` nor `images`.
///
/// A record with no image at all is malformed input; rendering a placeholder
/// beats propagating a missing-field fault into the templates.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// Normalize a raw catalog into products with non-empty image lists.
///
/// - a non-empty `images` field passes through unchanged
/// - otherwise a one-element list is synthesized from `image`
/// - a record with neither field gets [`PLACEHOLDER_IMAGE`]
///
/// Normalizing already-normalized data is a no-op.
#[must_use]
pub fn normalize_products(records: Vec<RawProductRecord>) -> Vec<Product> {
    records.into_iter().map(normalize_record).collect()
}

fn normalize_record(record: RawProductRecord) -> Product {
    let images = match (record.images, record.image) {
        (Some(images), _) if !images.is_empty() => images,
        (_, Some(image)) => vec![image],
        (_, None) => {
            tracing::warn!(
                product_id = record.id,
                "catalog record has no image field, substituting placeholder"
            );
            vec![PLACEHOLDER_IMAGE.to_string()]
        }
    };

    Product {
        id: ProductId::new(record.id),
        name: record.name,
        price: record.price,
        images,
        description: record.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepvault_core::Price;
    use rust_decimal::Decimal;

    fn raw(
        id: i64,
        image: Option<&str>,
        images: Option<Vec<&str>>,
    ) -> RawProductRecord {
        RawProductRecord {
            id,
            name: "Lamp".to_string(),
            price: Price::new(Decimal::from(1000)),
            description: "x".to_string(),
            image: image.map(String::from),
            images: images.map(|v| v.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_single_image_becomes_one_element_list() {
        let products = normalize_products(vec![raw(1, Some("a.jpg"), None)]);
        let product = products.first().expect("one product");

        assert_eq!(product.images, vec!["a.jpg"]);
        assert_eq!(product.first_image(), "a.jpg");
        assert_eq!(product.id, ProductId::new(1));
    }

    #[test]
    fn test_images_list_passes_through_unchanged() {
        let products = normalize_products(vec![raw(1, None, Some(vec!["a.jpg", "b.jpg"]))]);

        assert_eq!(
            products.first().expect("one product").images,
            vec!["a.jpg", "b.jpg"]
        );
    }

    #[test]
    fn test_images_list_wins_over_single_image() {
        let products = normalize_products(vec![raw(1, Some("old.jpg"), Some(vec!["a.jpg"]))]);

        assert_eq!(products.first().expect("one product").images, vec!["a.jpg"]);
    }

    #[test]
    fn test_empty_images_list_falls_back_to_single_image() {
        let products = normalize_products(vec![raw(1, Some("a.jpg"), Some(vec![]))]);

        assert_eq!(products.first().expect("one product").images, vec!["a.jpg"]);
    }

    #[test]
    fn test_no_image_at_all_gets_placeholder() {
        let products = normalize_products(vec![raw(1, None, None)]);

        assert_eq!(
            products.first().expect("one product").images,
            vec![PLACEHOLDER_IMAGE]
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_products(vec![
            raw(1, Some("a.jpg"), None),
            raw(2, None, Some(vec!["b.jpg", "c.jpg"])),
        ]);

        // Feed the normalized output back through as raw records.
        let again = normalize_products(
            once.iter()
                .map(|p| RawProductRecord {
                    id: p.id.as_i64(),
                    name: p.name.clone(),
                    price: p.price,
                    description: p.description.clone(),
                    image: None,
                    images: Some(p.images.clone()),
                })
                .collect(),
        );

        assert_eq!(once, again);
    }
}
