//! Cart line item types.
//!
//! The serialized form of [`CartItem`] is the unit of the persistence blob:
//! a JSON array of objects with `id`, `title`, `image_url`, `price`, and
//! `quantity` fields.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// One product entry in the cart.
///
/// At most one `CartItem` per [`ProductId`] exists in a cart at any time;
/// an item whose quantity reaches zero is removed rather than retained, so
/// every stored item has `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Total price for this line (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * rust_decimal::Decimal::from(self.quantity))
    }
}

/// An add-to-cart candidate: a [`CartItem`] without a quantity.
///
/// The store assigns quantity 1 on first insertion and increments the
/// existing line on repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemInput {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

impl CartItemInput {
    /// Promote the candidate to a stored line with the given quantity.
    #[must_use]
    pub fn into_item(self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_item() -> CartItem {
        CartItem {
            id: ProductId::new("sku-1"),
            title: "Espresso Beans".to_string(),
            image_url: "https://cdn.example.com/beans.jpg".to_string(),
            price: Price::new(Decimal::new(1050, 2)),
            quantity: 2,
        }
    }

    #[test]
    fn test_cart_item_json_shape() {
        let json = serde_json::to_value(sample_item()).unwrap();
        assert_eq!(json["id"], "sku-1");
        assert_eq!(json["title"], "Espresso Beans");
        assert_eq!(json["image_url"], "https://cdn.example.com/beans.jpg");
        // Price must be a JSON number, not a string
        assert!(json["price"].is_number());
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_cart_item_round_trip() {
        let item = sample_item();
        let json = serde_json::to_string(&item).unwrap();
        let back: CartItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_line_total() {
        let item = sample_item();
        assert_eq!(item.line_total().to_string(), "$21.00");
    }

    #[test]
    fn test_input_into_item() {
        let input = CartItemInput {
            id: ProductId::new("sku-2"),
            title: "Filter Paper".to_string(),
            image_url: "https://cdn.example.com/filters.jpg".to_string(),
            price: Price::new(Decimal::new(499, 2)),
        };

        let item = input.into_item(1);
        assert_eq!(item.id, ProductId::new("sku-2"));
        assert_eq!(item.quantity, 1);
    }
}
