//! Payment & Delivery Details
//!
//! The payment and fulfilment sub-objects embedded in an order. Both are
//! tagged unions on a `type` field, matching the stored-order wire shape.

use serde::{Deserialize, Serialize};

/// Payment method selected at checkout. Exactly one variant is active per
/// order; processing itself is simulated downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier in cash on handover.
    CashOnDelivery,

    /// Card payment. All four fields are required at validation time.
    #[serde(rename_all = "camelCase")]
    Card {
        /// Card number as entered
        card_number: String,

        /// Name on the card
        card_holder: String,

        /// Expiry in MM/YY form
        expiry_date: String,

        /// Card verification value
        cvv: String,
    },

    /// Bank transfer, identified by its reference string.
    Transfer {
        /// Transfer reference as entered
        reference: String,
    },
}

/// Fulfilment mode chosen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeliveryOption {
    /// Courier delivery to a campus location.
    #[serde(rename_all = "camelCase")]
    DeliverToLocation {
        /// Campus building name
        building: String,

        /// Room or classroom within the building
        classroom: String,

        /// Free-form directions for the courier
        #[serde(default, skip_serializing_if = "Option::is_none")]
        additional_info: Option<String>,

        /// Requested delivery window
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preferred_time: Option<String>,
    },

    /// Collect from the shop counter.
    Pickup,
}
