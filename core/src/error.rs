// opchain/src/error.rs
use thiserror::Error;

/// Usage errors: calls made out of the allowed order, singleton callbacks
/// registered twice, or finalizing a chain that never ran anything.
///
/// These are programmer mistakes, so they are returned straight from the
/// offending call instead of being collected into an `OperationResult`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OperationError {
  #[error("Break logic must be defined before execute")]
  BreakAfterExecution,

  #[error("Main operation has already been executed")]
  AlreadyExecuted,

  #[error("Lower execution can't be reflected after the main operation has executed, use execute instead")]
  ReflectAfterExecution,

  #[error("Exception observer has been set before")]
  ObserverAlreadySet,

  #[error("Exception flatter has been set before")]
  FlatterAlreadySet,

  #[error("Operation has been set before")]
  OperationAlreadySet,

  #[error("Main challenge has been set before")]
  ChallengeAlreadySet,

  #[error("Operation has already been executed and can no longer be configured")]
  ConfigureAfterExecution,

  #[error("Operation must be set before executing it")]
  OperationMissing,

  #[error("Operation is asynchronous, use execute_async")]
  AsyncOperationRequiresAwait,

  #[error("No operation was ever executed")]
  NothingExecuted,
}

pub type OpResult<T, E = OperationError> = std::result::Result<T, E>;
