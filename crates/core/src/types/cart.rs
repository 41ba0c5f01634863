//! Cart state container.
//!
//! The cart is the only shared mutable state in the storefront. It is an
//! explicit, serializable container owned by the device session - there is
//! no ambient singleton. Every mutation keeps two invariants:
//!
//! - at most one line per product id (adding an existing product increments
//!   its quantity instead of duplicating the line)
//! - every stored line has quantity >= 1 (dropping a quantity to zero or
//!   below removes the line)
//!
//! The total is derived on demand, never cached.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// One cart line: a product snapshot plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id this line refers to.
    pub id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Price,
    /// Representative image (the product's first image).
    pub image: String,
    /// Line quantity, always >= 1.
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity of an existing line for the same product id,
    /// or inserts a new line with quantity 1.
    pub fn add(&mut self, id: ProductId, name: &str, price: Price, image: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartItem {
            id,
            name: name.to_string(),
            price,
            image: image.to_string(),
            quantity: 1,
        });
    }

    /// Remove the line for a product id. No-op if absent.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
    }

    /// Set the quantity of a line to an absolute value.
    ///
    /// A quantity of zero or below removes the line. No-op for an absent id.
    /// The quantity is signed so that decrements coming from form input can
    /// fall through to removal instead of wrapping.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        let Ok(quantity) = u32::try_from(quantity) else {
            // Negative (or absurdly large) input; negatives mean removal.
            if quantity <= 0 {
                self.remove(id);
            }
            return;
        };
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Empty the cart. Used after a successful order submission.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The cart total, recomputed from the current lines.
    #[must_use]
    pub fn total(&self) -> Price {
        Price::new(
            self.items
                .iter()
                .map(|item| item.line_total().amount())
                .sum(),
        )
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines (distinct products) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn price(n: i64) -> Price {
        Price::new(Decimal::from(n))
    }

    fn id(n: i64) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn test_repeated_add_accumulates_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(id(1), "Lamp", price(1000), "a.jpg");
        }

        assert_eq!(cart.len(), 1);
        let item = cart.items().first().expect("one line");
        assert_eq!(item.quantity, 5);
        assert_eq!(cart.total(), price(5000));
    }

    #[test]
    fn test_add_two_products_two_lines() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.add(id(2), "Chair", price(2500), "b.jpg");
        cart.add(id(1), "Lamp", price(1000), "a.jpg");

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), price(2 * 1000 + 2500));
    }

    #[test]
    fn test_set_quantity_absolute() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.set_quantity(id(1), 7);

        assert_eq!(cart.items().first().expect("line").quantity, 7);
        assert_eq!(cart.total(), price(7000));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.set_quantity(id(1), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), price(0));
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.set_quantity(id(1), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.set_quantity(id(99), 4);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().expect("line").quantity, 1);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.remove(id(42));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_tracks_current_state() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.add(id(2), "Chair", price(500), "b.jpg");
        assert_eq!(cart.total(), price(1500));

        cart.set_quantity(id(2), 3);
        assert_eq!(cart.total(), price(2500));

        cart.remove(id(1));
        assert_eq!(cart.total(), price(1500));

        cart.clear();
        assert_eq!(cart.total(), price(0));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(id(1), "Lamp", price(1000), "a.jpg");
        cart.add(id(1), "Lamp", price(1000), "a.jpg");

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
    }
}
