// opchain/src/demand/execution.rs

//! Main execution, lower-execution reflection and finalization for `DemandOperation<T, E>`.

use crate::core::control::{ExecutionPolicy, OperationStatus};
use crate::core::result::OperationResult;
use crate::demand::definition::DemandOperation;
use crate::error::{OpResult, OperationError};
use std::fmt;
use std::future::Future;
use tracing::{event, instrument, Level};

impl<T, E> DemandOperation<T, E> {
  /// Runs the main action unless the chain is broken.
  ///
  /// `Ok(value)` becomes the pending value; `Err(err)` is collected as a failure whose
  /// message is resolved by the formatter when the result is built. Either way the
  /// chain is `Executed` afterwards.
  pub fn execute<A>(mut self, action: A) -> OpResult<Self>
  where
    A: FnOnce() -> Result<T, E>,
  {
    if self.execution_open()? {
      self.state.absorb(action());
    }
    Ok(self)
  }

  /// Async flavour of [`DemandOperation::execute`].
  #[instrument(
    name = "DemandOperation::execute_async",
    skip_all,
    fields(value_type = %std::any::type_name::<T>()),
    err(Display)
  )]
  pub async fn execute_async<A, Fut>(mut self, action: A) -> OpResult<Self>
  where
    A: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
  {
    if self.execution_open()? {
      let outcome = action().await;
      self.state.absorb(outcome);
    }
    Ok(self)
  }

  /// Awaits an already pending future as the main action.
  ///
  /// The future is dropped without being polled when the chain is broken.
  pub async fn execute_future<Fut>(self, future: Fut) -> OpResult<Self>
  where
    Fut: Future<Output = Result<T, E>>,
  {
    self.execute_async(|| future).await
  }

  /// Splices in the result of a nested chain in place of a plain value: its value
  /// becomes the pending value and its failures are appended, messages kept.
  pub fn reflect_lower_execution<S>(mut self, supplier: S) -> OpResult<Self>
  where
    S: FnOnce() -> OperationResult<T, E>,
  {
    if self.reflection_open()? {
      self.absorb_lower(supplier());
    }
    Ok(self)
  }

  /// Async flavour of [`DemandOperation::reflect_lower_execution`].
  #[instrument(
    name = "DemandOperation::reflect_lower_execution_async",
    skip_all,
    fields(value_type = %std::any::type_name::<T>()),
    err(Display)
  )]
  pub async fn reflect_lower_execution_async<S, Fut>(mut self, supplier: S) -> OpResult<Self>
  where
    S: FnOnce() -> Fut,
    Fut: Future<Output = OperationResult<T, E>>,
  {
    if self.reflection_open()? {
      let lower = supplier().await;
      self.absorb_lower(lower);
    }
    Ok(self)
  }

  fn execution_open(&self) -> OpResult<bool> {
    match (self.state.status, self.policy) {
      (OperationStatus::Broken, _) => {
        event!(Level::DEBUG, "Chain is broken, main action skipped.");
        Ok(false)
      }
      (OperationStatus::Executed, ExecutionPolicy::Strict) => {
        event!(Level::ERROR, "Main action executed twice under the strict policy.");
        Err(OperationError::AlreadyExecuted)
      }
      (OperationStatus::Executed, ExecutionPolicy::Idempotent) => {
        event!(Level::TRACE, "Re-running main action under the idempotent policy.");
        Ok(true)
      }
      (OperationStatus::NotExecuted, _) => Ok(true),
    }
  }

  fn reflection_open(&self) -> OpResult<bool> {
    match self.state.status {
      OperationStatus::NotExecuted => Ok(true),
      OperationStatus::Broken => {
        event!(Level::DEBUG, "Chain is broken, lower execution skipped.");
        Ok(false)
      }
      OperationStatus::Executed => {
        event!(Level::ERROR, "Lower execution reflected after the main action.");
        Err(OperationError::ReflectAfterExecution)
      }
    }
  }

  fn absorb_lower(&mut self, lower: OperationResult<T, E>) {
    let (value, failures) = lower.into_parts();
    event!(
      Level::DEBUG,
      has_value = value.is_some(),
      failures = failures.len(),
      "Reflecting lower execution."
    );
    self.state.pending_value = value;
    for failure in failures {
      self.state.record(failure.into());
    }
    self.state.status = OperationStatus::Executed;
  }
}

impl<T, E: fmt::Display> DemandOperation<T, E> {
  /// Freezes the chain into its result.
  ///
  /// The exception observer sees every collected failure in order, then every
  /// failure without a message gets one from the formatter (or the error's own
  /// text). Fails with [`OperationError::NothingExecuted`] when the chain produced
  /// neither a value nor a failure.
  #[instrument(
    name = "DemandOperation::get_result",
    skip_all,
    fields(
      status = ?self.state.status,
      failures = self.state.failures.len(),
    ),
    err(Display)
  )]
  pub fn get_result(mut self) -> OpResult<OperationResult<T, E>> {
    let (value, failures) = self.state.finish(self.observer);
    if value.is_none() && failures.is_empty() {
      event!(Level::ERROR, "Result requested from a chain that never executed.");
      return Err(OperationError::NothingExecuted);
    }
    Ok(OperationResult::from_parts(value, failures))
  }
}
