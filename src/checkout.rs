//! Checkout
//!
//! Transforms a session's cart plus the submitted checkout form into a
//! durable, immutable [`Order`], holding the cart's processing guard for the
//! duration of the submission. The order gateway and identity provider are
//! injected behind traits; the core never talks to the hosted backend
//! directly.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    cart::{CartError, CartStore},
    config::CheckoutConfig,
    orders::{
        CustomerId, NewOrder, Order, OrderUuid,
        details::{DeliveryOption, PaymentMethod},
    },
    pricing,
};

/// Error returned by the order persistence collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct OrderGatewayError(pub String);

/// Errors surfaced by checkout submission.
///
/// Validation errors are raised before any state changes; a gateway error
/// leaves the cart contents intact with the guard released, so the caller
/// can retry.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The cart has no lines to order.
    #[error("cart is empty")]
    EmptyCart,

    /// No signed-in customer to stamp the order with.
    #[error("no signed-in customer")]
    MissingCustomer,

    /// A required delivery field is missing or blank.
    #[error("delivery field `{0}` is required")]
    IncompleteDelivery(&'static str),

    /// A required payment field is missing or blank.
    #[error("payment field `{0}` is required")]
    IncompletePayment(&'static str),

    /// The cart rejected the guard acquisition.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order gateway failed to persist the order.
    #[error("order could not be saved")]
    Gateway(#[source] OrderGatewayError),
}

/// Checkout form as submitted by the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Selected payment method with its detail fields
    pub payment_method: PaymentMethod,

    /// Selected fulfilment mode
    pub delivery_option: DeliveryOption,

    /// Free-form note for the shop
    pub customer_notes: Option<String>,
}

/// Order persistence collaborator (the hosted document store).
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Persist a newly derived order. Called once per submission.
    async fn create_order(&self, order: &Order) -> Result<(), OrderGatewayError>;
}

/// Identity collaborator supplying the signed-in customer.
#[automock]
pub trait IdentityProvider: Send + Sync {
    /// The customer id for the active session, if signed in.
    fn current_customer(&self) -> Option<CustomerId>;
}

/// Derives immutable orders from the session cart.
#[derive(Debug)]
pub struct CheckoutService<G, I> {
    gateway: G,
    identity: I,
    config: CheckoutConfig,
}

impl<G, I> CheckoutService<G, I>
where
    G: OrderGateway,
    I: IdentityProvider,
{
    /// Create a service over the given collaborators and policy.
    #[must_use]
    pub fn new(gateway: G, identity: I, config: CheckoutConfig) -> Self {
        Self {
            gateway,
            identity,
            config,
        }
    }

    /// Submit the checkout form, deriving and persisting an order.
    ///
    /// Validation happens first and mutates nothing. The cart's processing
    /// guard is then held across the gateway call: on success the cart is
    /// cleared (which also releases the guard); on gateway failure the guard
    /// is released and the cart contents are preserved for retry.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing to order.
    /// - [`CheckoutError::MissingCustomer`]: no signed-in customer.
    /// - [`CheckoutError::IncompleteDelivery`] /
    ///   [`CheckoutError::IncompletePayment`]: a required form field is
    ///   blank.
    /// - [`CheckoutError::Cart`]: a submission is already in flight.
    /// - [`CheckoutError::Gateway`]: the order write failed.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        form: CheckoutForm,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let customer = self
            .identity
            .current_customer()
            .filter(|id| !id.as_str().trim().is_empty())
            .ok_or(CheckoutError::MissingCustomer)?;

        validate_delivery(&form.delivery_option)?;
        validate_payment(&form.payment_method)?;

        cart.begin_order()?;

        let order = derive_order(cart, form, customer, self.config.tax_rate, Timestamp::now());

        match self.gateway.create_order(&order).await {
            Ok(()) => {
                cart.clear();
                tracing::info!(order = %order.uuid(), total = %order.total(), "order submitted");

                Ok(order)
            }
            Err(error) => {
                cart.end_order();
                tracing::warn!(order = %order.uuid(), %error, "order submission failed");

                Err(CheckoutError::Gateway(error))
            }
        }
    }
}

/// Build the order draft from the cart snapshot and form selections.
///
/// `subtotal` is the cart total at this instant; it is never recomputed
/// later. The item list is cloned out of the cart, so later cart mutations
/// cannot reach the order.
fn derive_order(
    cart: &CartStore,
    form: CheckoutForm,
    customer: CustomerId,
    tax_rate: Decimal,
    at: Timestamp,
) -> Order {
    let subtotal = cart.total();
    let tax = pricing::tax_on(subtotal, tax_rate);

    Order::create(
        NewOrder {
            uuid: OrderUuid::new(),
            customer_id: customer,
            items: cart.items().to_vec(),
            subtotal,
            tax,
            total: subtotal + tax,
            payment_method: form.payment_method,
            delivery_option: form.delivery_option,
            customer_notes: form.customer_notes,
            estimated_delivery_time: None,
        },
        at,
    )
}

fn validate_delivery(option: &DeliveryOption) -> Result<(), CheckoutError> {
    if let DeliveryOption::DeliverToLocation {
        building,
        classroom,
        ..
    } = option
    {
        if building.trim().is_empty() {
            return Err(CheckoutError::IncompleteDelivery("building"));
        }

        if classroom.trim().is_empty() {
            return Err(CheckoutError::IncompleteDelivery("classroom"));
        }
    }

    Ok(())
}

fn validate_payment(method: &PaymentMethod) -> Result<(), CheckoutError> {
    match method {
        PaymentMethod::CashOnDelivery => Ok(()),
        PaymentMethod::Card {
            card_number,
            card_holder,
            expiry_date,
            cvv,
        } => {
            let fields = [
                ("card_number", card_number),
                ("card_holder", card_holder),
                ("expiry_date", expiry_date),
                ("cvv", cvv),
            ];

            for (name, value) in fields {
                if value.trim().is_empty() {
                    return Err(CheckoutError::IncompletePayment(name));
                }
            }

            Ok(())
        }
        PaymentMethod::Transfer { reference } => {
            if reference.trim().is_empty() {
                return Err(CheckoutError::IncompletePayment("reference"));
            }

            Ok(())
        }
    }
}
