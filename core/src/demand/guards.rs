// opchain/src/demand/guards.rs

//! Break guards for `DemandOperation<T, E>`: pre-conditions evaluated before the
//! main action. The first guard that trips breaks the chain; later guards and
//! the main action are skipped.

use crate::core::control::OperationStatus;
use crate::core::failure::{FailureCause, PendingFailure, BREAK_REQUESTED_MESSAGE};
use crate::demand::definition::DemandOperation;
use crate::error::{OpResult, OperationError};
use std::future::Future;
use tracing::{event, instrument, Level};

impl<T, E> DemandOperation<T, E> {
  /// Breaks the chain when `predicate` returns `Ok(true)` or fails.
  ///
  /// A failing predicate records its error with `message` (or the formatter's text
  /// when no message is given). A `true` answer records a break with `message`
  /// or `"Break logic executed"`.
  pub fn break_if<P>(mut self, predicate: P, message: Option<&str>) -> OpResult<Self>
  where
    P: FnOnce() -> Result<bool, E>,
  {
    if self.guard_open()? {
      let outcome = predicate();
      self.apply_guard(outcome, message);
    }
    Ok(self)
  }

  /// Async flavour of [`DemandOperation::break_if`].
  #[instrument(
    name = "DemandOperation::break_if_async",
    skip_all,
    fields(value_type = %std::any::type_name::<T>()),
    err(Display)
  )]
  pub async fn break_if_async<P, Fut>(mut self, predicate: P, message: Option<&str>) -> OpResult<Self>
  where
    P: FnOnce() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
  {
    if self.guard_open()? {
      let outcome = predicate().await;
      self.apply_guard(outcome, message);
    }
    Ok(self)
  }

  /// Breaks the chain only if `action` fails; its success value is discarded.
  pub fn break_if_throws_any<A, R>(mut self, action: A, message: &str) -> OpResult<Self>
  where
    A: FnOnce() -> Result<R, E>,
  {
    if self.guard_open()? {
      let outcome = action().map(|_| false);
      self.apply_guard(outcome, Some(message));
    }
    Ok(self)
  }

  /// Whether a guard should run now. Guards after a break are no-ops; guards
  /// after the main action are a usage error.
  fn guard_open(&self) -> OpResult<bool> {
    match self.state.status {
      OperationStatus::NotExecuted => Ok(true),
      OperationStatus::Broken => {
        event!(Level::TRACE, "Chain already broken, guard skipped.");
        Ok(false)
      }
      OperationStatus::Executed => {
        event!(Level::ERROR, "Guard declared after the main action executed.");
        Err(OperationError::BreakAfterExecution)
      }
    }
  }

  fn apply_guard(&mut self, outcome: Result<bool, E>, message: Option<&str>) {
    match outcome {
      Ok(false) => {
        event!(Level::TRACE, "Guard passed.");
      }
      Ok(true) => {
        let message = message.unwrap_or(BREAK_REQUESTED_MESSAGE);
        event!(Level::DEBUG, break_message = message, "Guard requested a break.");
        self
          .state
          .record(PendingFailure::with_message(FailureCause::BreakRequested, message));
        self.state.status = OperationStatus::Broken;
      }
      Err(err) => {
        event!(Level::DEBUG, "Guard raised an error, chain broken.");
        self.state.record(PendingFailure::raised(err, message.map(str::to_owned)));
        self.state.status = OperationStatus::Broken;
      }
    }
  }
}
