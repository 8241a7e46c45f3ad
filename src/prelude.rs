//! Tuckshop prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartStore},
    checkout::{
        CheckoutError, CheckoutForm, CheckoutService, IdentityProvider, OrderGateway,
        OrderGatewayError,
    },
    config::CheckoutConfig,
    items::CartItem,
    orders::{
        CustomerId, NewOrder, Order, OrderUuid,
        details::{DeliveryOption, PaymentMethod},
        status::{OrderState, OrderStatus, StatusError},
    },
    products::{Product, ProductCategory, ProductUuid},
    storage::{CartSlot, DEFAULT_SLOT_KEY, JsonFileCartSlot, MemoryCartSlot, SlotError},
};
