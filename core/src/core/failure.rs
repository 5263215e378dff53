// opchain/src/core/failure.rs

//! Defines the normalized failure record (`Failure<E>`) and its cause (`FailureCause<E>`).

use std::fmt;

pub(crate) const BREAK_REQUESTED_MESSAGE: &str = "Break logic executed";
pub(crate) const CHALLENGE_REJECTED_MESSAGE: &str = "Challenge rejected";

/// What made a chain fail.
///
/// `E` is the caller's own error type. It is expected to be a closed enum so a
/// formatter can turn it into a user message with a total `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause<E> {
  /// A guard, the main action or an awaited future returned `Err(E)`.
  Raised(E),
  /// A guard predicate asked the chain to break.
  BreakRequested,
  /// A challenge predicate rejected the produced value.
  ChallengeRejected,
}

impl<E> FailureCause<E> {
  /// The raised error, if this failure came from one.
  pub fn raised(&self) -> Option<&E> {
    match self {
      FailureCause::Raised(err) => Some(err),
      _ => None,
    }
  }

  pub fn is_raised(&self) -> bool {
    matches!(self, FailureCause::Raised(_))
  }
}

impl<E: fmt::Display> fmt::Display for FailureCause<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FailureCause::Raised(err) => err.fmt(f),
      FailureCause::BreakRequested => f.write_str(BREAK_REQUESTED_MESSAGE),
      FailureCause::ChallengeRejected => f.write_str(CHALLENGE_REJECTED_MESSAGE),
    }
  }
}

/// A failure collected by a chain: the cause plus the message meant for users.
///
/// Immutable once built. Only produced while finalizing a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure<E> {
  cause: FailureCause<E>,
  user_message: String,
}

impl<E> Failure<E> {
  pub fn new(cause: FailureCause<E>, user_message: impl Into<String>) -> Self {
    Self {
      cause,
      user_message: user_message.into(),
    }
  }

  pub fn cause(&self) -> &FailureCause<E> {
    &self.cause
  }

  pub fn user_message(&self) -> &str {
    &self.user_message
  }

  pub fn into_cause(self) -> FailureCause<E> {
    self.cause
  }
}

impl<E: fmt::Display> Failure<E> {
  /// Builds a failure whose message is the cause's own text.
  pub fn from_cause(cause: FailureCause<E>) -> Self {
    let user_message = cause.to_string();
    Self { cause, user_message }
  }
}

impl<E: fmt::Display> fmt::Display for Failure<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.user_message)
  }
}

/// A failure collected during a run whose message may still be pending.
///
/// Guard breaks and challenge rejections carry their message from the start;
/// raised errors usually wait for the exception formatter at finalization.
pub(crate) struct PendingFailure<E> {
  pub(crate) cause: FailureCause<E>,
  pub(crate) message: Option<String>,
}

impl<E> PendingFailure<E> {
  pub(crate) fn raised(err: E, message: Option<String>) -> Self {
    Self {
      cause: FailureCause::Raised(err),
      message,
    }
  }

  pub(crate) fn with_message(cause: FailureCause<E>, message: impl Into<String>) -> Self {
    Self {
      cause,
      message: Some(message.into()),
    }
  }
}

impl<E> From<Failure<E>> for PendingFailure<E> {
  fn from(failure: Failure<E>) -> Self {
    Self {
      cause: failure.cause,
      message: Some(failure.user_message),
    }
  }
}
