// opchain/examples/checkout_demand.rs

use opchain::{OperationBuilder, OperationError, PendingDemandOperation};
use tracing::{info, warn};

// 1. A closed error type the application flattens into user messages.
#[derive(Debug, thiserror::Error)]
enum CheckoutError {
  #[error("Cart {0} is empty")]
  EmptyCart(u32),
  #[error("Payment gateway rejected the charge: {0}")]
  PaymentRejected(String),
}

fn flatten(err: &CheckoutError) -> String {
  match err {
    CheckoutError::EmptyCart(_) => "Your cart is empty".to_string(),
    CheckoutError::PaymentRejected(_) => "Your payment could not be processed".to_string(),
  }
}

async fn charge(cart_id: u32, amount_cents: u64) -> Result<String, CheckoutError> {
  tokio::task::yield_now().await;
  if amount_cents > 10_000 {
    return Err(CheckoutError::PaymentRejected(format!("limit exceeded for cart {}", cart_id)));
  }
  Ok(format!("receipt-{}-{}", cart_id, amount_cents))
}

async fn checkout(cart_id: u32, items: usize, amount_cents: u64, blocked: bool) -> Result<(), OperationError> {
  let result = OperationBuilder::create_demand_operation::<String, CheckoutError>()
    .break_if(move || Ok(blocked), Some("Your account is on hold"))?
    .break_if_throws_any(
      move || if items == 0 { Err(CheckoutError::EmptyCart(cart_id)) } else { Ok(()) },
      "Add something to your cart first",
    )?
    .execute_async(move || charge(cart_id, amount_cents))
    .on_exception(|cause| warn!(%cause, "checkout failure"))
    .flat_exception(flatten)
    .get_result()
    .await?;

  info!(cart_id, "{}", result);
  match result.into_result() {
    Ok(receipt) => info!(%receipt, "Checkout succeeded"),
    Err(failures) => {
      for failure in failures {
        info!(user_message = failure.user_message(), "Checkout failed");
      }
    }
  }
  Ok(())
}

#[tokio::main]
async fn main() -> Result<(), OperationError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Demand Operation Example ---");

  checkout(1, 3, 4_200, false).await?;
  checkout(2, 0, 4_200, false).await?;
  checkout(3, 1, 99_000, false).await?;
  checkout(4, 1, 100, true).await?;
  Ok(())
}
