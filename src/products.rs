//! Products

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Catalog category a product is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Savoury snacks
    Snacks,

    /// Bottled and canned drinks
    Drinks,

    /// Chocolate and confectionery
    Sweets,

    /// Fresh food (fruit pots, sandwiches)
    Fresh,

    /// Bundled meal deals
    Combos,
}

/// Product snapshot as served by the catalog collaborator.
///
/// The cart treats this as an immutable value at the moment a line item is
/// created; the price is captured at add-time and never re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    #[serde(rename = "id")]
    pub uuid: ProductUuid,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Unit price in major units (e.g. `4.99`)
    pub price: Decimal,

    /// Catalog category
    pub category: ProductCategory,

    /// Units in stock
    pub stock: u32,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Average review rating, if any reviews exist
    #[serde(default)]
    pub rating: Option<Decimal>,

    /// Number of reviews behind the rating
    #[serde(default)]
    pub review_count: u32,

    /// Whether the product is currently purchasable
    pub is_active: bool,

    /// Whether the product is featured on the storefront
    pub is_featured: bool,

    /// Creation timestamp
    pub created_at: Timestamp,

    /// Last-update timestamp
    pub updated_at: Timestamp,
}
