//! Pricing
//!
//! Shared total-calculation helpers used by the cart store and the order
//! deriver. All amounts are major-unit decimals; the cart is single-currency.

use rust_decimal::Decimal;

use crate::items::CartItem;

/// Line total for a unit price and quantity.
#[must_use]
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of the line totals of the given items.
#[must_use]
pub fn items_total(items: &[CartItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |acc, item| acc + item.total_price())
}

/// Sum of the quantities of the given items.
#[must_use]
pub fn items_count(items: &[CartItem]) -> u32 {
    items.iter().map(CartItem::quantity).sum()
}

/// Tax due on a subtotal at the given rate, rounded to two decimal places.
#[must_use]
pub fn tax_on(subtotal: Decimal, rate: Decimal) -> Decimal {
    (subtotal * rate).round_dp(2)
}

#[cfg(test)]
mod tests {
    use crate::fixtures;

    use super::*;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(
            line_total(Decimal::new(4_99, 2), 3),
            Decimal::new(14_97, 2)
        );
    }

    #[test]
    fn line_total_of_zero_quantity_is_zero() {
        assert_eq!(line_total(Decimal::new(4_99, 2), 0), Decimal::ZERO);
    }

    #[test]
    fn items_total_sums_line_totals() {
        let items = [
            CartItem::new(fixtures::crisps(), 2),
            CartItem::new(fixtures::cola(), 1),
        ];

        assert_eq!(items_total(&items), Decimal::new(3_48, 2));
    }

    #[test]
    fn items_total_of_no_items_is_zero() {
        assert_eq!(items_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn items_count_sums_quantities() {
        let items = [
            CartItem::new(fixtures::crisps(), 2),
            CartItem::new(fixtures::cola(), 3),
        ];

        assert_eq!(items_count(&items), 5);
    }

    #[test]
    fn tax_rounds_to_two_decimal_places() {
        assert_eq!(
            tax_on(Decimal::new(15_00, 2), Decimal::new(10, 2)),
            Decimal::new(1_50, 2)
        );
        assert_eq!(
            tax_on(Decimal::new(99, 2), Decimal::new(75, 3)),
            Decimal::new(7, 2)
        );
    }

    #[test]
    fn zero_rate_yields_zero_tax() {
        assert_eq!(tax_on(Decimal::new(15_00, 2), Decimal::ZERO), Decimal::ZERO);
    }
}
