// opchain/src/factory.rs

//! Stateless entry points handing out fresh, independent chains.

use crate::challenge::ChallengeOperation;
use crate::core::control::ExecutionPolicy;
use crate::demand::DemandOperation;

/// Entry point for building chains.
///
/// ```
/// use opchain::OperationBuilder;
///
/// # fn main() -> Result<(), opchain::OperationError> {
/// let result = OperationBuilder::create_challenge_operation::<String, anyhow::Error>()
///   .set_operation(|| Ok("Hello Well".to_string()))?
///   .set_challenge(|r: &String| r.contains("We"), "no We")?
///   .set_and_success_if(|r: &String| r.ends_with('l'), "no l")?
///   .execute()?;
/// assert!(result.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationBuilder;

impl OperationBuilder {
  /// A guard-aware accumulating chain with the `Strict` execution policy.
  pub fn create_demand_operation<T, E>() -> DemandOperation<T, E> {
    DemandOperation::new()
  }

  pub fn create_demand_operation_with<T, E>(policy: ExecutionPolicy) -> DemandOperation<T, E> {
    DemandOperation::new().with_policy(policy)
  }

  /// A single-shot chain validating its value with challenges.
  pub fn create_challenge_operation<T, E>() -> ChallengeOperation<T, E> {
    ChallengeOperation::new()
  }
}
