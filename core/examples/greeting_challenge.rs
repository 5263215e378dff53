// opchain/examples/greeting_challenge.rs

use opchain::{OperationBuilder, OperationError};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum GreetingError {
  #[error("Name must not be empty")]
  EmptyName,
}

async fn say_hello(name: &str) -> Result<String, GreetingError> {
  if name.is_empty() {
    return Err(GreetingError::EmptyName);
  }
  tokio::task::yield_now().await;
  Ok(format!("Hello {}, Well met", name))
}

#[tokio::main]
async fn main() -> Result<(), OperationError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Challenge Operation Example ---");

  for name in ["named", ""] {
    let name = name.to_string();
    let mut operation = OperationBuilder::create_challenge_operation::<String, GreetingError>()
      .set_async_operation(move || async move { say_hello(&name).await })?
      .set_challenge(|r: &String| r.contains("named"), "this is unnamed!")?
      .set_or_success_if(|r: &String| r.contains("Hello"), None)?
      .set_and_success_if(|r: &String| r.contains("Well"), "has not well")?
      .set_exception_flatter(|err| match err {
        GreetingError::EmptyName => "Please tell us your name".to_string(),
      })?;

    let result = operation.execute_async().await?;
    info!("{}", result);
    if !result.is_success() {
      info!("User message: {}", result.user_failure());
    }
  }
  Ok(())
}
