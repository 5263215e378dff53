// opchain/src/challenge/execution.rs

//! Runs the one main action of a `ChallengeOperation<T, E>` and challenges its value.

use crate::challenge::definition::{ChallengeOperation, MainOperation};
use crate::core::control::OperationStatus;
use crate::core::failure::{FailureCause, PendingFailure};
use crate::core::result::OperationResult;
use crate::error::{OpResult, OperationError};
use std::fmt;
use tracing::{event, instrument, Level};

impl<T, E: fmt::Display> ChallengeOperation<T, E> {
  /// Runs a synchronous operation and challenges its value.
  ///
  /// The result holds either the value and no failure, or no value and exactly one
  /// failure: the raised error, or the rejection of the deciding challenge.
  #[instrument(
    name = "ChallengeOperation::execute",
    skip_all,
    fields(value_type = %std::any::type_name::<T>()),
    err(Display)
  )]
  pub fn execute(&mut self) -> OpResult<OperationResult<T, E>> {
    if let Some(MainOperation::Async(_)) = self.operation {
      event!(Level::ERROR, "Asynchronous operation executed synchronously.");
      return Err(OperationError::AsyncOperationRequiresAwait);
    }
    let outcome = match self.take_operation()? {
      MainOperation::Sync(action) => action(),
      MainOperation::Async(_) => return Err(OperationError::AsyncOperationRequiresAwait),
    };
    Ok(self.conclude(outcome))
  }

  /// Runs the operation, awaiting it if it is asynchronous, and challenges its value.
  #[instrument(
    name = "ChallengeOperation::execute_async",
    skip_all,
    fields(value_type = %std::any::type_name::<T>()),
    err(Display)
  )]
  pub async fn execute_async(&mut self) -> OpResult<OperationResult<T, E>> {
    let outcome = match self.take_operation()? {
      MainOperation::Sync(action) => action(),
      MainOperation::Async(action) => action().await,
    };
    Ok(self.conclude(outcome))
  }

  fn take_operation(&mut self) -> OpResult<MainOperation<T, E>> {
    if self.state.status == OperationStatus::Executed {
      event!(Level::ERROR, "Challenge operation executed twice.");
      return Err(OperationError::AlreadyExecuted);
    }
    let operation = self.operation.take().ok_or(OperationError::OperationMissing)?;
    self.state.status = OperationStatus::Executed;
    Ok(operation)
  }

  fn conclude(&mut self, outcome: Result<T, E>) -> OperationResult<T, E> {
    self.state.absorb(outcome);
    if let Some(value) = self.state.pending_value.take() {
      let verdict = self.challenges.evaluate(&value);
      if verdict.passed {
        self.state.pending_value = Some(value);
      } else {
        event!(Level::DEBUG, rejection = %verdict.message, "Value rejected by challenges.");
        self
          .state
          .record(PendingFailure::with_message(FailureCause::ChallengeRejected, verdict.message));
      }
    }

    let (value, failures) = self.state.finish(None);
    OperationResult::from_parts(value, failures)
  }
}
