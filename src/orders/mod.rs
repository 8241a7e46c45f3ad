//! Orders
//!
//! The immutable order record derived from a cart at checkout time, plus its
//! payment/delivery sub-objects and status lifecycle. An order is created
//! once; afterwards only its status record (and the matching `updated_at`
//! stamp) may change, through the transition table in [`status`].

pub mod details;
pub mod status;

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{items::CartItem, uuids::TypedUuid};

use self::{
    details::{DeliveryOption, PaymentMethod},
    status::{OrderState, OrderStatus, StatusError},
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Opaque customer identifier issued by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Wrap an identity-provider id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Draft of an order, assembled by the checkout deriver before persistence.
///
/// Carries everything except the status record and timestamps, which
/// [`Order::create`] stamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Client-generated order identifier
    pub uuid: OrderUuid,

    /// Customer the order belongs to
    pub customer_id: CustomerId,

    /// Deep copy of the cart lines at submission time
    pub items: Vec<CartItem>,

    /// Cart total at submission time
    pub subtotal: Decimal,

    /// Tax due on the subtotal
    pub tax: Decimal,

    /// `subtotal + tax`
    pub total: Decimal,

    /// Selected payment method
    pub payment_method: PaymentMethod,

    /// Selected fulfilment mode
    pub delivery_option: DeliveryOption,

    /// Free-form note from the customer
    pub customer_notes: Option<String>,

    /// Promised delivery time, if one was quoted
    pub estimated_delivery_time: Option<Timestamp>,
}

/// Committed purchase request, immutable once created.
///
/// The item list is an owned snapshot; mutating the originating cart after
/// derivation cannot affect an order. Serializes field-for-field in the
/// stored-order wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "id")]
    uuid: OrderUuid,
    #[serde(rename = "userId")]
    customer_id: CustomerId,
    items: Vec<CartItem>,
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    payment_method: PaymentMethod,
    delivery_option: DeliveryOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    customer_notes: Option<String>,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_delivery_time: Option<Timestamp>,
}

impl Order {
    /// Finalize a draft into an order, starting the lifecycle at
    /// [`OrderState::Pending`] with `created_at = updated_at = at`.
    #[must_use]
    pub fn create(new: NewOrder, at: Timestamp) -> Self {
        Self {
            uuid: new.uuid,
            customer_id: new.customer_id,
            items: new.items,
            subtotal: new.subtotal,
            tax: new.tax,
            total: new.total,
            payment_method: new.payment_method,
            delivery_option: new.delivery_option,
            customer_notes: new.customer_notes,
            status: OrderStatus::pending(at),
            created_at: at,
            updated_at: at,
            estimated_delivery_time: new.estimated_delivery_time,
        }
    }

    /// Order identifier.
    pub fn uuid(&self) -> OrderUuid {
        self.uuid
    }

    /// Customer the order belongs to.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Snapshot of the cart lines at submission time.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Cart total at submission time.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Tax charged on the subtotal.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Amount due: `subtotal + tax`.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Selected payment method.
    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    /// Selected fulfilment mode.
    pub fn delivery_option(&self) -> &DeliveryOption {
        &self.delivery_option
    }

    /// Free-form note from the customer, if any.
    pub fn customer_notes(&self) -> Option<&str> {
        self.customer_notes.as_deref()
    }

    /// Current status record.
    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Timestamp of the last status change, or creation.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Promised delivery time, if one was quoted.
    pub fn estimated_delivery_time(&self) -> Option<Timestamp> {
        self.estimated_delivery_time
    }

    /// Move the order to `next`, stamping `updated_at`.
    ///
    /// The only mutation an order permits after creation.
    ///
    /// # Errors
    ///
    /// - [`StatusError::IllegalTransition`]: `next` is not reachable from
    ///   the current state.
    pub fn set_status(
        &mut self,
        next: OrderState,
        notes: Option<String>,
        at: Timestamp,
    ) -> Result<(), StatusError> {
        self.status.advance(next, notes, at)?;
        self.updated_at = at;

        Ok(())
    }
}
