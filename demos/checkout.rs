//! End-to-end checkout walkthrough.
//!
//! Fills a cart from the fixture catalog, flushes it to an in-memory slot,
//! rehydrates it as a new session would, and submits a checkout against a
//! stubbed gateway, printing the derived order.

use async_trait::async_trait;
use clap::Parser;
use rust_decimal::Decimal;
use tuckshop::{fixtures, prelude::*};

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
struct Args {
    /// Units of each fixture product to add
    #[clap(short, long, default_value_t = 1)]
    quantity: u32,

    /// Tax rate applied at checkout (e.g. 0.10)
    #[clap(short, long, default_value = "0.10")]
    tax_rate: Decimal,
}

struct AcceptingGateway;

#[async_trait]
impl OrderGateway for AcceptingGateway {
    async fn create_order(&self, _order: &Order) -> Result<(), OrderGatewayError> {
        Ok(())
    }
}

struct DemoIdentity;

impl IdentityProvider for DemoIdentity {
    fn current_customer(&self) -> Option<CustomerId> {
        Some(CustomerId::new("demo-student"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let slot = MemoryCartSlot::new();

    let mut cart = CartStore::new();
    cart.add_item(fixtures::crisps(), args.quantity)?;
    cart.add_item(fixtures::cola(), args.quantity)?;
    cart.add_item(fixtures::meal_deal(), args.quantity)?;
    cart.persist(&slot, DEFAULT_SLOT_KEY)?;

    // A fresh session picks the cart back up from the slot.
    let mut cart = CartStore::restore(&slot, DEFAULT_SLOT_KEY);
    println!(
        "restored cart: {} items, total {}",
        cart.item_count(),
        cart.total()
    );

    let service = CheckoutService::new(
        AcceptingGateway,
        DemoIdentity,
        CheckoutConfig::new(args.tax_rate),
    );

    let form = CheckoutForm {
        payment_method: PaymentMethod::CashOnDelivery,
        delivery_option: DeliveryOption::DeliverToLocation {
            building: "Library".to_owned(),
            classroom: "L1.02".to_owned(),
            additional_info: None,
            preferred_time: Some("13:00".to_owned()),
        },
        customer_notes: Some("leave at the front desk".to_owned()),
    };

    let order = service.submit(&mut cart, form).await?;

    println!("{}", serde_json::to_string_pretty(&order)?);

    Ok(())
}
