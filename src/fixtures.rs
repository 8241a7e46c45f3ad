//! Product Fixtures
//!
//! Canned catalog snapshots for tests and demos. Prices are fixed so
//! total-arithmetic assertions stay readable.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::products::{Product, ProductCategory, ProductUuid};

/// Build a product snapshot with the given name, price and category.
///
/// Stock, flags and rating aggregates get serviceable defaults; each call
/// generates a fresh uuid.
#[must_use]
pub fn product(name: &str, price: Decimal, category: ProductCategory) -> Product {
    let now = Timestamp::now();

    Product {
        uuid: ProductUuid::new(),
        name: name.to_owned(),
        description: format!("{name} from the campus tuck shop"),
        price,
        category,
        stock: 100,
        images: Vec::new(),
        rating: None,
        review_count: 0,
        is_active: true,
        is_featured: false,
        created_at: now,
        updated_at: now,
    }
}

/// Chocolate bar, 1.20
#[must_use]
pub fn chocolate_bar() -> Product {
    product("Chocolate Bar", Decimal::new(1_20, 2), ProductCategory::Sweets)
}

/// Salted crisps, 0.99
#[must_use]
pub fn crisps() -> Product {
    product("Salted Crisps", Decimal::new(99, 2), ProductCategory::Snacks)
}

/// Cola can, 1.50
#[must_use]
pub fn cola() -> Product {
    product("Cola Can", Decimal::new(1_50, 2), ProductCategory::Drinks)
}

/// Fruit pot, 2.75
#[must_use]
pub fn fruit_pot() -> Product {
    product("Fruit Pot", Decimal::new(2_75, 2), ProductCategory::Fresh)
}

/// Meal deal, 4.99
#[must_use]
pub fn meal_deal() -> Product {
    product("Meal Deal", Decimal::new(4_99, 2), ProductCategory::Combos)
}
