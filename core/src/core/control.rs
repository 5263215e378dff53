// opchain/src/core/control.rs

//! Defines the lifecycle status of a chain and the policy for repeated main executions.

/// Where a chain is in its lifecycle.
///
/// `NotExecuted` moves to either `Broken` or `Executed`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
  /// No guard has tripped and the main action hasn't run yet.
  #[default]
  NotExecuted,
  /// A guard tripped before the main action ran. The main action will never run.
  Broken,
  /// The main action (or a reflected lower execution) ran, whatever its outcome.
  Executed,
}

impl OperationStatus {
  pub fn is_terminal(self) -> bool {
    !matches!(self, OperationStatus::NotExecuted)
  }
}

/// How a demand chain treats `execute` once it has already executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
  /// A second main execution is a usage error.
  #[default]
  Strict,
  /// Every `execute` call runs on its own: a success overwrites the pending value,
  /// a failure is appended to the collected failures.
  Idempotent,
}
