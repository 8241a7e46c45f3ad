//! Configuration

use rust_decimal::Decimal;

/// Checkout policy supplied by the embedding application.
///
/// The tax rate applies uniformly to every derived order; there is no
/// per-page override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Tax rate applied to the order subtotal (e.g. `0.10` for 10%).
    pub tax_rate: Decimal,
}

impl CheckoutConfig {
    /// Create a config with the given tax rate.
    #[must_use]
    pub const fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }
}

impl Default for CheckoutConfig {
    /// Tax-free checkout, the storefront's live behaviour.
    fn default() -> Self {
        Self::new(Decimal::ZERO)
    }
}
