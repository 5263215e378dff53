// opchain/src/core/state.rs

//! The execution state shared by both chain policies: lifecycle status, the value
//! produced by the main action, the failures collected so far and the exception
//! formatter used to turn raised errors into user messages.

use crate::core::control::OperationStatus;
use crate::core::failure::{Failure, FailureCause, PendingFailure};
use crate::error::{OpResult, OperationError};
use std::fmt;
use tracing::{event, Level};

/// Turns a raised error into the message shown to users.
pub type ExceptionFlatter<E> = Box<dyn Fn(&E) -> String + Send + Sync>;

/// Side effect invoked once per collected failure when a chain is finalized.
pub type ExceptionObserver<E> = Box<dyn FnMut(&FailureCause<E>) + Send>;

pub(crate) struct ExecutionState<T, E> {
  pub(crate) status: OperationStatus,
  pub(crate) pending_value: Option<T>,
  pub(crate) failures: Vec<PendingFailure<E>>,
  flatter: Option<ExceptionFlatter<E>>,
}

impl<T, E> ExecutionState<T, E> {
  pub(crate) fn new() -> Self {
    Self {
      status: OperationStatus::NotExecuted,
      pending_value: None,
      failures: Vec::new(),
      flatter: None,
    }
  }

  pub(crate) fn has_flatter(&self) -> bool {
    self.flatter.is_some()
  }

  pub(crate) fn set_flatter(&mut self, flatter: ExceptionFlatter<E>) -> OpResult<()> {
    if self.flatter.is_some() {
      return Err(OperationError::FlatterAlreadySet);
    }
    self.flatter = Some(flatter);
    Ok(())
  }

  pub(crate) fn record(&mut self, failure: PendingFailure<E>) {
    event!(
      Level::DEBUG,
      failure_index = self.failures.len(),
      raised = failure.cause.is_raised(),
      "Failure collected."
    );
    self.failures.push(failure);
  }

  /// Records the outcome of a main action and marks the state executed.
  pub(crate) fn absorb(&mut self, outcome: Result<T, E>) {
    match outcome {
      Ok(value) => {
        event!(Level::DEBUG, "Main action produced a value.");
        self.pending_value = Some(value);
      }
      Err(err) => {
        event!(Level::DEBUG, "Main action raised an error.");
        self.record(PendingFailure::raised(err, None));
      }
    }
    self.status = OperationStatus::Executed;
  }
}

impl<T, E: fmt::Display> ExecutionState<T, E> {
  /// Drains the collected value and failures: notifies the observer of every failure
  /// in order, then resolves every missing message through the formatter (or the
  /// cause's own text). Status and formatter stay in place.
  pub(crate) fn finish(&mut self, mut observer: Option<ExceptionObserver<E>>) -> (Option<T>, Vec<Failure<E>>) {
    if let Some(observer) = observer.as_mut() {
      for failure in &self.failures {
        observer(&failure.cause);
      }
    }

    let flatter = &self.flatter;
    let failures = std::mem::take(&mut self.failures)
      .into_iter()
      .map(|pending| {
        let message = match (pending.message, &pending.cause) {
          (Some(message), _) => message,
          (None, FailureCause::Raised(err)) => match &flatter {
            Some(flatter) => flatter(err),
            None => err.to_string(),
          },
          (None, cause) => cause.to_string(),
        };
        Failure::new(pending.cause, message)
      })
      .collect::<Vec<_>>();

    event!(
      Level::DEBUG,
      has_value = self.pending_value.is_some(),
      failures = failures.len(),
      "Execution state finalized."
    );
    (self.pending_value.take(), failures)
  }
}
