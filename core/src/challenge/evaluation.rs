// opchain/src/challenge/evaluation.rs

//! Challenge evaluation: the main challenge decides whether the AND group or the
//! OR group gets the final word. Both groups short-circuit.

use crate::core::failure::CHALLENGE_REJECTED_MESSAGE;
use tracing::{event, Level};

pub(crate) type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

pub(crate) struct Challenge<T> {
  pub(crate) predicate: Predicate<T>,
  pub(crate) message: Option<String>,
}

impl<T> Challenge<T> {
  pub(crate) fn new(predicate: Predicate<T>, message: Option<String>) -> Self {
    Self { predicate, message }
  }

  fn check(&self, value: &T) -> bool {
    (self.predicate)(value)
  }

  fn rejection_message(&self) -> String {
    self
      .message
      .clone()
      .unwrap_or_else(|| CHALLENGE_REJECTED_MESSAGE.to_string())
  }
}

/// Pass/fail verdict of an evaluation. Never leaves this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChallengeOutcome {
  pub(crate) passed: bool,
  pub(crate) message: String,
}

impl ChallengeOutcome {
  fn pass() -> Self {
    Self {
      passed: true,
      message: String::new(),
    }
  }

  fn fail(message: String) -> Self {
    Self { passed: false, message }
  }
}

pub(crate) struct ChallengeSet<T> {
  pub(crate) main: Option<Challenge<T>>,
  pub(crate) or_group: Vec<Challenge<T>>,
  pub(crate) and_group: Vec<Challenge<T>>,
}

impl<T> ChallengeSet<T> {
  pub(crate) fn new() -> Self {
    Self {
      main: None,
      or_group: Vec::new(),
      and_group: Vec::new(),
    }
  }

  /// A missing main challenge counts as passed.
  pub(crate) fn evaluate(&self, value: &T) -> ChallengeOutcome {
    match &self.main {
      None => self.evaluate_and(value),
      Some(main) if main.check(value) => self.evaluate_and(value),
      Some(main) => {
        event!(Level::DEBUG, "Main challenge failed, trying the OR group.");
        self.evaluate_or(value, main)
      }
    }
  }

  /// Fails on the first member that rejects the value, with that member's message.
  fn evaluate_and(&self, value: &T) -> ChallengeOutcome {
    let rejected = self
      .and_group
      .iter()
      .enumerate()
      .find(|(_, challenge)| !challenge.check(value));
    match rejected {
      None => ChallengeOutcome::pass(),
      Some((idx, challenge)) => {
        event!(Level::DEBUG, and_index = idx, "AND challenge rejected the value.");
        ChallengeOutcome::fail(challenge.rejection_message())
      }
    }
  }

  /// Passes on the first member that accepts the value. Otherwise fails with the
  /// main challenge's message.
  fn evaluate_or(&self, value: &T, main: &Challenge<T>) -> ChallengeOutcome {
    for (idx, challenge) in self.or_group.iter().enumerate() {
      if challenge.check(value) {
        event!(Level::DEBUG, or_index = idx, "OR challenge rescued the value.");
        return ChallengeOutcome::pass();
      }
      event!(Level::TRACE, or_index = idx, or_message = ?challenge.message, "OR challenge failed.");
    }
    ChallengeOutcome::fail(main.rejection_message())
  }
}
