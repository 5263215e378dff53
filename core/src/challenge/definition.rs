// opchain/src/challenge/definition.rs

//! Contains the `ChallengeOperation<T, E>` struct definition and the fluent setters
//! registering its operation, challenges and exception formatter.

use crate::challenge::evaluation::{Challenge, ChallengeSet};
use crate::core::control::OperationStatus;
use crate::core::state::ExecutionState;
use crate::error::{OpResult, OperationError};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{event, Level};

pub(crate) type BoxedAction<T, E> = Box<dyn FnOnce() -> Result<T, E> + Send>;
pub(crate) type BoxedAsyncAction<T, E> =
  Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>> + Send>;

pub(crate) enum MainOperation<T, E> {
  Sync(BoxedAction<T, E>),
  Async(BoxedAsyncAction<T, E>),
}

/// A single-shot chain: one main action whose value is then validated by a main
/// challenge plus AND/OR groups of secondary challenges.
///
/// Setters take the chain by value. `execute` borrows it mutably and may run only
/// once; a second call is a usage error.
pub struct ChallengeOperation<T, E = anyhow::Error> {
  pub(crate) operation: Option<MainOperation<T, E>>,
  pub(crate) challenges: ChallengeSet<T>,
  pub(crate) state: ExecutionState<T, E>,
}

impl<T, E> ChallengeOperation<T, E> {
  pub fn new() -> Self {
    Self {
      operation: None,
      challenges: ChallengeSet::new(),
      state: ExecutionState::new(),
    }
  }

  pub fn status(&self) -> OperationStatus {
    self.state.status
  }

  /// Registers the main action. Only one operation, sync or async, may be set.
  pub fn set_operation<A>(self, action: A) -> OpResult<Self>
  where
    A: FnOnce() -> Result<T, E> + Send + 'static,
  {
    self.register(MainOperation::Sync(Box::new(action)))
  }

  /// Registers an async main action; run it with `execute_async`.
  pub fn set_async_operation<A, Fut>(self, action: A) -> OpResult<Self>
  where
    A: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
  {
    let boxed: BoxedAsyncAction<T, E> =
      Box::new(move || -> Pin<Box<dyn Future<Output = Result<T, E>> + Send>> { Box::pin(action()) });
    self.register(MainOperation::Async(boxed))
  }

  /// Registers the main challenge the produced value must satisfy.
  pub fn set_challenge<P>(mut self, predicate: P, fail_message: &str) -> OpResult<Self>
  where
    P: Fn(&T) -> bool + Send + Sync + 'static,
  {
    if self.challenges.main.is_some() {
      event!(Level::ERROR, "Main challenge registered twice.");
      return Err(OperationError::ChallengeAlreadySet);
    }
    self.ensure_configurable()?;
    self.challenges.main = Some(Challenge::new(Box::new(predicate), Some(fail_message.to_string())));
    Ok(self)
  }

  /// Adds an alternative consulted only when the main challenge fails. Any member
  /// accepting the value rescues it; if none does, the main challenge's message is
  /// reported.
  pub fn set_or_success_if<P>(mut self, predicate: P, fail_message: Option<&str>) -> OpResult<Self>
  where
    P: Fn(&T) -> bool + Send + Sync + 'static,
  {
    self.ensure_configurable()?;
    self
      .challenges
      .or_group
      .push(Challenge::new(Box::new(predicate), fail_message.map(str::to_owned)));
    Ok(self)
  }

  /// Adds a requirement consulted only when the main challenge passes. The first
  /// member rejecting the value decides the failure message.
  pub fn set_and_success_if<P>(mut self, predicate: P, fail_message: &str) -> OpResult<Self>
  where
    P: Fn(&T) -> bool + Send + Sync + 'static,
  {
    self.ensure_configurable()?;
    self
      .challenges
      .and_group
      .push(Challenge::new(Box::new(predicate), Some(fail_message.to_string())));
    Ok(self)
  }

  /// Registers the formatter for errors raised by the main action. Challenge
  /// rejections keep their own messages. Can be set only once.
  pub fn set_exception_flatter<F>(mut self, formatter: F) -> OpResult<Self>
  where
    F: Fn(&E) -> String + Send + Sync + 'static,
  {
    if self.state.has_flatter() {
      event!(Level::ERROR, "Exception flatter registered twice.");
      return Err(OperationError::FlatterAlreadySet);
    }
    self.ensure_configurable()?;
    self.state.set_flatter(Box::new(formatter))?;
    Ok(self)
  }

  /// Challenges and the formatter are frozen once the operation has run.
  fn ensure_configurable(&self) -> OpResult<()> {
    if self.state.status.is_terminal() {
      event!(Level::ERROR, "Challenge operation configured after execution.");
      return Err(OperationError::ConfigureAfterExecution);
    }
    Ok(())
  }

  fn register(mut self, operation: MainOperation<T, E>) -> OpResult<Self> {
    if self.operation.is_some() || self.state.status.is_terminal() {
      event!(Level::ERROR, "Operation registered twice.");
      return Err(OperationError::OperationAlreadySet);
    }
    self.operation = Some(operation);
    Ok(self)
  }
}

impl<T, E> Default for ChallengeOperation<T, E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, E> fmt::Debug for ChallengeOperation<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let operation = match &self.operation {
      None => "none",
      Some(MainOperation::Sync(_)) => "sync",
      Some(MainOperation::Async(_)) => "async",
    };
    f.debug_struct("ChallengeOperation")
      .field("status", &self.state.status)
      .field("operation", &operation)
      .field("main_challenge_present", &self.challenges.main.is_some())
      .field("or_group", &self.challenges.or_group.len())
      .field("and_group", &self.challenges.and_group.len())
      .finish()
  }
}
