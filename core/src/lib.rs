// src/lib.rs

//! opchain: fluent, railway-oriented operation chaining.
//!
//! A chain runs one unit of work and reports everything that went wrong in a single
//! [`OperationResult`] instead of propagating errors:
//!  - Break guards evaluated before the main action; the first one that trips stops
//!    the chain.
//!  - A synchronous or asynchronous main action.
//!  - Splicing in the result of a nested chain.
//!  - Challenges validating the produced value, combined through short-circuiting
//!    AND/OR groups.
//!  - A formatter turning raised errors into user messages, and an observer seeing
//!    every failure.
//!
//! Business failures never escape a chain. Only usage errors (calls in the wrong
//! order, singleton callbacks registered twice) come back as [`OperationError`].

pub mod challenge;
pub mod core;
pub mod demand;
pub mod error;
pub mod factory;

// --- Re-exports for the Public API ---

pub use crate::core::control::{ExecutionPolicy, OperationStatus};
pub use crate::core::failure::{Failure, FailureCause};
pub use crate::core::result::OperationResult;
pub use crate::core::{ExceptionFlatter, ExceptionObserver};

pub use crate::challenge::ChallengeOperation;
pub use crate::demand::{DemandOperation, PendingDemandOperation};

pub use crate::error::{OpResult, OperationError};

pub use crate::factory::OperationBuilder;

/*
    Typical flow:
    1. Get a chain from `OperationBuilder` (or `DemandOperation::new()`).
    2. Declare guards with `.break_if(..)?` / `.break_if_async(..).await?`.
    3. Run the main action with `.execute(..)?`, `.execute_async(..).await?`, or splice
       a nested chain in with `.reflect_lower_execution(..)?`.
    4. Optionally register `.flat_exception(..)?` and `.on_exception(..)?`, in any order.
    5. Call `.get_result()?` and inspect `is_success()`, `value()` and `failures()`.
*/
