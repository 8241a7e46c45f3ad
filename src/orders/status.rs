//! Order Status

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from applying an order status transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    /// The requested transition is not in the allowed progression.
    #[error("order status cannot move from {from} to {to}")]
    IllegalTransition {
        /// State the order is currently in.
        from: OrderState,
        /// State the transition was attempting to reach.
        to: OrderState,
    },
}

/// Progression states for a submitted order.
///
/// The lifecycle is a monotonic forward walk from [`OrderState::Pending`] to
/// [`OrderState::Delivered`], with [`OrderState::Cancelled`] reachable from
/// any non-terminal state. Skipping forward over intermediate states is
/// allowed; moving backwards or out of a terminal state is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    /// Submitted, awaiting confirmation by the shop.
    Pending,

    /// Accepted by the shop.
    Confirmed,

    /// Being assembled.
    Preparing,

    /// Packed and waiting for a courier.
    ReadyForDelivery,

    /// With a courier.
    OutForDelivery,

    /// Handed over. Terminal.
    Delivered,

    /// Abandoned before delivery. Terminal.
    Cancelled,
}

impl OrderState {
    /// Check whether this state ends the lifecycle.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Check whether a transition to `next` is allowed.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() || next == self {
            return false;
        }

        if next == Self::Cancelled {
            return true;
        }

        next.progression_rank() > self.progression_rank()
    }

    fn progression_rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::ReadyForDelivery => 3,
            Self::OutForDelivery => 4,
            Self::Delivered => 5,
            // Cancelled is an escape, not a step on the progression.
            Self::Cancelled => u8::MAX,
        }
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::ReadyForDelivery => "READY_FOR_DELIVERY",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };

        f.write_str(name)
    }
}

/// Status record carried by an order: the current state, when it last
/// changed, and an optional operator note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    status: OrderState,
    updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl OrderStatus {
    /// Initial status for a freshly derived order.
    #[must_use]
    pub fn pending(at: Timestamp) -> Self {
        Self {
            status: OrderState::Pending,
            updated_at: at,
            notes: None,
        }
    }

    /// The current lifecycle state.
    pub fn status(&self) -> OrderState {
        self.status
    }

    /// When the state last changed.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Operator note attached to the last change, if any.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Apply a transition, replacing the note and stamping the change time.
    ///
    /// # Errors
    ///
    /// - [`StatusError::IllegalTransition`]: `next` is not reachable from
    ///   the current state.
    pub fn advance(
        &mut self,
        next: OrderState,
        notes: Option<String>,
        at: Timestamp,
    ) -> Result<(), StatusError> {
        if !self.status.can_transition_to(next) {
            return Err(StatusError::IllegalTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        self.updated_at = at;
        self.notes = notes;

        Ok(())
    }
}
