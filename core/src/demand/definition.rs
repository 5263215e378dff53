// opchain/src/demand/definition.rs

//! Contains the `DemandOperation<T, E>` struct definition, its construction and the
//! registration of its singleton callbacks (exception observer and formatter).

use crate::core::control::{ExecutionPolicy, OperationStatus};
use crate::core::failure::FailureCause;
use crate::core::state::{ExceptionObserver, ExecutionState};
use crate::error::{OpResult, OperationError};
use std::fmt;
use tracing::{event, Level};

/// A guard-aware chain that accumulates every failure it meets.
///
/// `T` is the value produced by the main action and `E` the error type raised by
/// guards and actions. `E` defaults to `anyhow::Error` for callers that don't keep
/// their own closed error enum.
///
/// The chain is a consuming builder: each call takes it by value and hands it back,
/// so there is never more than one live handle to its state.
///
/// ```
/// use opchain::{DemandOperation, OperationError};
///
/// # fn main() -> Result<(), OperationError> {
/// let result = DemandOperation::<String>::new()
///   .break_if(|| Ok(false), None)?
///   .execute(|| Ok("hi".to_string()))?
///   .get_result()?;
///
/// assert!(result.is_success());
/// assert_eq!(result.value().map(String::as_str), Some("hi"));
/// # Ok(())
/// # }
/// ```
pub struct DemandOperation<T, E = anyhow::Error> {
  pub(crate) state: ExecutionState<T, E>,
  pub(crate) observer: Option<ExceptionObserver<E>>,
  pub(crate) policy: ExecutionPolicy,
}

impl<T, E> DemandOperation<T, E> {
  /// Creates a chain with the `Strict` execution policy.
  pub fn new() -> Self {
    Self {
      state: ExecutionState::new(),
      observer: None,
      policy: ExecutionPolicy::default(),
    }
  }

  pub fn with_policy(mut self, policy: ExecutionPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn policy(&self) -> ExecutionPolicy {
    self.policy
  }

  pub fn status(&self) -> OperationStatus {
    self.state.status
  }

  /// Registers a side effect called once per collected failure, in order, when
  /// the result is built. Can be set only once.
  pub fn on_exception<O>(mut self, observer: O) -> OpResult<Self>
  where
    O: FnMut(&FailureCause<E>) + Send + 'static,
  {
    if self.observer.is_some() {
      event!(Level::ERROR, "Exception observer registered twice.");
      return Err(OperationError::ObserverAlreadySet);
    }
    self.observer = Some(Box::new(observer));
    Ok(self)
  }

  /// Registers the formatter turning raised errors into user messages. Failures
  /// that already carry a message (guard breaks with a message) bypass it.
  /// Can be set only once.
  pub fn flat_exception<F>(mut self, formatter: F) -> OpResult<Self>
  where
    F: Fn(&E) -> String + Send + Sync + 'static,
  {
    if let Err(err) = self.state.set_flatter(Box::new(formatter)) {
      event!(Level::ERROR, "Exception flatter registered twice.");
      return Err(err);
    }
    Ok(self)
  }
}

impl<T, E> Default for DemandOperation<T, E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, E> fmt::Debug for DemandOperation<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DemandOperation")
      .field("status", &self.state.status)
      .field("policy", &self.policy)
      .field("has_value", &self.state.pending_value.is_some())
      .field("failures", &self.state.failures.len())
      .field("observer_present", &self.observer.is_some())
      .finish()
  }
}
