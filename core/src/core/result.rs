// opchain/src/core/result.rs

//! Defines `OperationResult<T, E>`, the terminal report produced by every chain.

use crate::core::failure::Failure;
use std::fmt;

/// Outcome of a chain: the produced value, if any, and every failure collected
/// along the way in the order they happened.
///
/// A demand chain can report several failures. A challenge chain reports at most one,
/// readable through [`OperationResult::failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult<T, E> {
  value: Option<T>,
  failures: Vec<Failure<E>>,
}

impl<T, E> OperationResult<T, E> {
  pub(crate) fn from_parts(value: Option<T>, failures: Vec<Failure<E>>) -> Self {
    Self { value, failures }
  }

  /// A successful result carrying `value`.
  pub fn success(value: T) -> Self {
    Self {
      value: Some(value),
      failures: Vec::new(),
    }
  }

  /// A failed result without a value.
  pub fn failed(failures: impl IntoIterator<Item = Failure<E>>) -> Self {
    Self {
      value: None,
      failures: failures.into_iter().collect(),
    }
  }

  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn value(&self) -> Option<&T> {
    self.value.as_ref()
  }

  pub fn failures(&self) -> &[Failure<E>] {
    &self.failures
  }

  /// The first (for a challenge chain, the only) failure.
  pub fn failure(&self) -> Option<&Failure<E>> {
    self.failures.first()
  }

  /// Every user message joined with `" - "`.
  pub fn user_failure(&self) -> String {
    self
      .failures
      .iter()
      .map(Failure::user_message)
      .collect::<Vec<_>>()
      .join(" - ")
  }

  pub fn into_value(self) -> Option<T> {
    self.value
  }

  pub fn into_parts(self) -> (Option<T>, Vec<Failure<E>>) {
    (self.value, self.failures)
  }

  /// Leaves the railway: `Ok` only when there were no failures and a value exists.
  ///
  /// A failure-free result without a value can only be built by hand through
  /// [`OperationResult::failed`] with no failures; it maps to `Err(vec![])`.
  pub fn into_result(self) -> Result<T, Vec<Failure<E>>> {
    match (self.value, self.failures.is_empty()) {
      (Some(value), true) => Ok(value),
      (_, _) => Err(self.failures),
    }
  }
}

impl<T: fmt::Debug, E> fmt::Display for OperationResult<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Status: {} - Result: {:?} - Failures: {}",
      self.is_success(),
      self.value,
      self.failures.len()
    )
  }
}
