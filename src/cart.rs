//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    items::CartItem,
    pricing::{items_count, items_total},
    products::{Product, ProductUuid},
    storage::{CartSlot, SlotError},
};

/// Errors returned by cart mutations.
///
/// A returned error always means the cart state is unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// An order submission is in flight; the cart is read-only until it resolves.
    #[error("an order is being processed; the cart cannot be modified")]
    OrderInProgress,

    /// Quantity must be at least 1 when adding to the cart.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Product snapshots must carry a non-negative price.
    #[error("product {0} has a negative price")]
    InvalidPrice(ProductUuid),

    /// No line item exists for the product.
    #[error("product {0} is not in the cart")]
    UnknownProduct(ProductUuid),
}

/// In-memory cart state machine for a single session.
///
/// Holds the line items plus derived aggregates (`total`, `item_count`) that
/// are recomputed on every mutation, and the processing guard that makes the
/// cart read-only while an order submission is in flight. At most one line
/// exists per product.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
    total: Decimal,
    item_count: u32,
    processing_order: bool,
    dirty: bool,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart seeded with the given items.
    ///
    /// Lines are normalised: line totals are recomputed from the captured
    /// unit price, duplicate product lines are merged, and lines with a zero
    /// quantity or a negative price are dropped with a warning. Aggregates
    /// are recomputed from the surviving lines.
    #[must_use]
    pub fn with_items(items: impl Into<Vec<CartItem>>) -> Self {
        let mut store = Self::new();

        for item in items.into() {
            let quantity = item.quantity();
            let product = item.into_product();

            if quantity == 0 {
                tracing::warn!(product = %product.uuid, "dropping zero-quantity cart line");
                continue;
            }

            if product.price < Decimal::ZERO {
                tracing::warn!(product = %product.uuid, "dropping negatively-priced cart line");
                continue;
            }

            store.merge_line(product, quantity);
        }

        store.recalculate();
        store.dirty = false;

        store
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// Merges into an existing line for the same product, otherwise appends
    /// a new line. Aggregates are recomputed either way.
    ///
    /// # Errors
    ///
    /// - [`CartError::OrderInProgress`]: the processing guard is held.
    /// - [`CartError::InvalidQuantity`]: `quantity` is zero.
    /// - [`CartError::InvalidPrice`]: the snapshot carries a negative price.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        self.ensure_unlocked()?;

        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if product.price < Decimal::ZERO {
            return Err(CartError::InvalidPrice(product.uuid));
        }

        self.merge_line(product, quantity);
        self.recalculate();

        Ok(())
    }

    /// Set the quantity of an existing line directly (not additive).
    ///
    /// A quantity of zero removes the line; the remove-on-zero contract
    /// lives here rather than with the caller.
    ///
    /// # Errors
    ///
    /// - [`CartError::OrderInProgress`]: the processing guard is held.
    /// - [`CartError::UnknownProduct`]: no line exists for the product.
    pub fn update_quantity(
        &mut self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), CartError> {
        self.ensure_unlocked()?;

        if quantity == 0 {
            return self.remove_line(product);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.product_uuid() == product)
            .ok_or(CartError::UnknownProduct(product))?;

        item.set_quantity(quantity);
        self.recalculate();

        Ok(())
    }

    /// Remove the line for the given product.
    ///
    /// # Errors
    ///
    /// - [`CartError::OrderInProgress`]: the processing guard is held.
    /// - [`CartError::UnknownProduct`]: no line exists for the product.
    pub fn remove_item(&mut self, product: ProductUuid) -> Result<(), CartError> {
        self.ensure_unlocked()?;
        self.remove_line(product)
    }

    /// Reset to the empty cart and release the processing guard.
    ///
    /// Always succeeds, including while the guard is held. This is the
    /// designated unlock path after a confirmed order.
    pub fn clear(&mut self) {
        self.items.clear();
        self.processing_order = false;
        self.recalculate();
    }

    /// Acquire the processing guard for the duration of an order submission.
    ///
    /// # Errors
    ///
    /// - [`CartError::OrderInProgress`]: the guard is already held.
    pub fn begin_order(&mut self) -> Result<(), CartError> {
        self.ensure_unlocked()?;
        self.processing_order = true;

        Ok(())
    }

    /// Release the processing guard without clearing the cart.
    ///
    /// Used when an order submission fails and the cart contents must be
    /// preserved for retry.
    pub fn end_order(&mut self) {
        self.processing_order = false;
    }

    /// Check whether a line exists for the given product.
    pub fn contains(&self, product: ProductUuid) -> bool {
        self.items
            .iter()
            .any(|item| item.product_uuid() == product)
    }

    /// Quantity on the line for the given product, if present.
    pub fn quantity_of(&self, product: ProductUuid) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product_uuid() == product)
            .map(CartItem::quantity)
    }

    /// The current line items, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Sum of all line quantities.
    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Check whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check whether the processing guard is held.
    pub fn is_processing_order(&self) -> bool {
        self.processing_order
    }

    /// Check whether there are changes not yet flushed to a slot.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flush the item list to the durable slot if it has changed.
    ///
    /// Writes are last-write-wins; an unchanged cart is not rewritten.
    ///
    /// # Errors
    ///
    /// Returns a [`SlotError`] if encoding or the slot write fails; the cart
    /// stays dirty so the flush can be retried.
    pub fn persist(&mut self, slot: &impl CartSlot, key: &str) -> Result<(), SlotError> {
        if !self.dirty {
            return Ok(());
        }

        let payload = serde_json::to_string(&self.items)?;
        slot.write(key, &payload)?;
        self.dirty = false;

        Ok(())
    }

    /// Rehydrate a cart from the durable slot.
    ///
    /// An empty or missing slot yields an empty cart. A corrupt payload is
    /// logged and discarded, also yielding an empty cart; rehydration never
    /// blocks the session. Aggregates are recomputed from the loaded lines
    /// rather than trusted from the payload.
    #[must_use]
    pub fn restore(slot: &impl CartSlot, key: &str) -> Self {
        match Self::try_restore(slot, key) {
            Ok(store) => store,
            Err(error) => {
                tracing::warn!(key, %error, "discarding unreadable cart slot");
                Self::new()
            }
        }
    }

    fn try_restore(slot: &impl CartSlot, key: &str) -> Result<Self, SlotError> {
        let Some(payload) = slot.read(key)? else {
            return Ok(Self::new());
        };

        let items: Vec<CartItem> = serde_json::from_str(&payload)?;

        Ok(Self::with_items(items))
    }

    fn ensure_unlocked(&self) -> Result<(), CartError> {
        if self.processing_order {
            return Err(CartError::OrderInProgress);
        }

        Ok(())
    }

    fn merge_line(&mut self, product: Product, quantity: u32) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_uuid() == product.uuid)
        {
            Some(item) => {
                let merged = item.quantity() + quantity;
                item.set_quantity(merged);
            }
            None => self.items.push(CartItem::new(product, quantity)),
        }
    }

    fn remove_line(&mut self, product: ProductUuid) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|item| item.product_uuid() != product);

        if self.items.len() == before {
            return Err(CartError::UnknownProduct(product));
        }

        self.recalculate();

        Ok(())
    }

    fn recalculate(&mut self) {
        self.total = items_total(&self.items);
        self.item_count = items_count(&self.items);
        self.dirty = true;
    }
}
