//! Checkout submission flow against mocked collaborators.

use rust_decimal::Decimal;
use testresult::TestResult;
use tuckshop::{
    cart::CartStore,
    checkout::{
        CheckoutError, CheckoutForm, CheckoutService, MockIdentityProvider, MockOrderGateway,
        OrderGatewayError,
    },
    config::CheckoutConfig,
    fixtures,
    orders::{
        CustomerId,
        details::{DeliveryOption, PaymentMethod},
        status::OrderState,
    },
};

fn signed_in(customer: &str) -> MockIdentityProvider {
    let id = CustomerId::new(customer);
    let mut identity = MockIdentityProvider::new();
    identity.expect_current_customer().return_const(Some(id));

    identity
}

fn accepting_gateway() -> MockOrderGateway {
    let mut gateway = MockOrderGateway::new();
    gateway.expect_create_order().returning(|_| Ok(()));

    gateway
}

fn delivery_form() -> CheckoutForm {
    CheckoutForm {
        payment_method: PaymentMethod::Transfer {
            reference: "TRF-0042".to_owned(),
        },
        delivery_option: DeliveryOption::DeliverToLocation {
            building: "Science Block".to_owned(),
            classroom: "S2.14".to_owned(),
            additional_info: Some("second floor".to_owned()),
            preferred_time: Some("12:30".to_owned()),
        },
        customer_notes: Some("knock twice".to_owned()),
    }
}

#[tokio::test]
async fn confirmed_order_snapshots_the_cart() -> TestResult {
    let service = CheckoutService::new(
        accepting_gateway(),
        signed_in("student-7"),
        CheckoutConfig::new(Decimal::new(10, 2)),
    );

    let mut cart = CartStore::new();
    cart.add_item(fixtures::cola(), 10)?; // 15.00

    let order = service.submit(&mut cart, delivery_form()).await?;

    assert_eq!(order.subtotal(), Decimal::new(15_00, 2));
    assert_eq!(order.tax(), Decimal::new(1_50, 2));
    assert_eq!(order.total(), Decimal::new(16_50, 2));
    assert_eq!(order.status().status(), OrderState::Pending);
    assert_eq!(order.customer_id().as_str(), "student-7");
    assert_eq!(order.items().len(), 1);
    assert_eq!(order.created_at(), order.updated_at());

    assert!(cart.is_empty(), "cart clears on confirmation");
    assert!(!cart.is_processing_order(), "guard released");

    Ok(())
}

#[tokio::test]
async fn later_cart_mutations_cannot_reach_the_order() -> TestResult {
    let service = CheckoutService::new(
        accepting_gateway(),
        signed_in("student-7"),
        CheckoutConfig::default(),
    );

    let mut cart = CartStore::new();
    let crisps = fixtures::crisps();
    cart.add_item(crisps.clone(), 2)?;

    let order = service.submit(&mut cart, delivery_form()).await?;
    let subtotal_at_derivation = order.subtotal();
    let items_at_derivation = order.items().to_vec();

    // The session keeps shopping after the order went through.
    cart.add_item(crisps, 5)?;
    cart.add_item(fixtures::meal_deal(), 3)?;
    cart.clear();

    assert_eq!(order.subtotal(), subtotal_at_derivation);
    assert_eq!(order.items(), items_at_derivation.as_slice());
    assert_eq!(order.total(), subtotal_at_derivation, "zero-rate total");

    Ok(())
}

#[tokio::test]
async fn gateway_failure_keeps_the_cart_for_retry() -> TestResult {
    let mut gateway = MockOrderGateway::new();
    gateway
        .expect_create_order()
        .times(1)
        .returning(|_| Err(OrderGatewayError("document store unavailable".to_owned())));

    let service = CheckoutService::new(
        gateway,
        signed_in("student-7"),
        CheckoutConfig::default(),
    );

    let mut cart = CartStore::new();
    cart.add_item(fixtures::fruit_pot(), 2)?;
    let total_before = cart.total();

    let result = service.submit(&mut cart, delivery_form()).await;

    assert!(
        matches!(result, Err(CheckoutError::Gateway(_))),
        "expected Gateway error, got {result:?}"
    );
    assert_eq!(cart.total(), total_before);
    assert_eq!(cart.item_count(), 2);
    assert!(!cart.is_processing_order(), "guard released on failure");

    Ok(())
}

#[tokio::test]
async fn retry_after_failure_succeeds() -> TestResult {
    let mut gateway = MockOrderGateway::new();
    let mut attempts = 0_u32;
    gateway.expect_create_order().returning(move |_| {
        attempts += 1;
        if attempts == 1 {
            Err(OrderGatewayError("transient".to_owned()))
        } else {
            Ok(())
        }
    });

    let service = CheckoutService::new(
        gateway,
        signed_in("student-7"),
        CheckoutConfig::default(),
    );

    let mut cart = CartStore::new();
    cart.add_item(fixtures::crisps(), 1)?;

    let first = service.submit(&mut cart, delivery_form()).await;
    assert!(first.is_err(), "first attempt should fail");

    let order = service.submit(&mut cart, delivery_form()).await?;

    assert_eq!(order.items().len(), 1);
    assert!(cart.is_empty());

    Ok(())
}

#[tokio::test]
async fn validation_failures_leave_cart_untouched() -> TestResult {
    let service = CheckoutService::new(
        MockOrderGateway::new(),
        signed_in("student-7"),
        CheckoutConfig::default(),
    );

    let mut cart = CartStore::new();
    cart.add_item(fixtures::cola(), 1)?;

    let incomplete = CheckoutForm {
        payment_method: PaymentMethod::Card {
            card_number: "4111111111111111".to_owned(),
            card_holder: String::new(),
            expiry_date: "12/27".to_owned(),
            cvv: "123".to_owned(),
        },
        delivery_option: DeliveryOption::Pickup,
        customer_notes: None,
    };

    let result = service.submit(&mut cart, incomplete).await;

    assert!(
        matches!(
            result,
            Err(CheckoutError::IncompletePayment("card_holder"))
        ),
        "expected IncompletePayment, got {result:?}"
    );
    assert_eq!(cart.item_count(), 1);
    assert!(!cart.is_processing_order(), "guard never acquired");

    Ok(())
}

#[tokio::test]
async fn submitted_order_serializes_in_wire_shape() -> TestResult {
    let service = CheckoutService::new(
        accepting_gateway(),
        signed_in("student-7"),
        CheckoutConfig::default(),
    );

    let mut cart = CartStore::new();
    cart.add_item(fixtures::chocolate_bar(), 1)?;

    let order = service.submit(&mut cart, delivery_form()).await?;
    let value = serde_json::to_value(&order)?;

    assert_eq!(
        value.pointer("/userId").and_then(serde_json::Value::as_str),
        Some("student-7")
    );
    assert_eq!(
        value
            .pointer("/paymentMethod/type")
            .and_then(serde_json::Value::as_str),
        Some("transfer")
    );
    assert_eq!(
        value
            .pointer("/deliveryOption/building")
            .and_then(serde_json::Value::as_str),
        Some("Science Block")
    );
    assert_eq!(
        value
            .pointer("/status/status")
            .and_then(serde_json::Value::as_str),
        Some("PENDING")
    );
    assert_eq!(
        value
            .pointer("/customerNotes")
            .and_then(serde_json::Value::as_str),
        Some("knock twice")
    );

    Ok(())
}
