//! Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::line_total,
    products::{Product, ProductUuid},
};

/// One product entry in the cart with a quantity and derived line total.
///
/// `total_price` is never set independently; it is recomputed from the
/// captured unit price whenever the quantity changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    product: Product,
    quantity: u32,
    total_price: Decimal,
}

impl CartItem {
    /// Create a line item for the given product snapshot and quantity.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        let total_price = line_total(product.price, quantity);

        Self {
            product,
            quantity,
            total_price,
        }
    }

    /// The product snapshot captured when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Identifier of the captured product.
    pub fn product_uuid(&self) -> ProductUuid {
        self.product.uuid
    }

    /// Unit price captured at add-time.
    pub fn unit_price(&self) -> Decimal {
        self.product.price
    }

    /// Number of units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total: `quantity * unit_price`.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Consume the line, yielding the product snapshot.
    #[must_use]
    pub fn into_product(self) -> Product {
        self.product
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = line_total(self.product.price, quantity);
    }
}
