pub mod control;
pub mod failure;
pub mod result;
pub(crate) mod state;

// Re-export key types for easier access from the chain modules (and lib.rs)
pub use control::{ExecutionPolicy, OperationStatus};
pub use failure::{Failure, FailureCause};
pub use result::OperationResult;
pub use state::{ExceptionFlatter, ExceptionObserver};
