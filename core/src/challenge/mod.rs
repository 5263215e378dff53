// opchain/src/challenge/mod.rs

//! Defines the `ChallengeOperation<T, E>` chain: a single main action whose value is
//! validated by a main challenge and short-circuiting AND/OR challenge groups.

pub mod definition;
pub mod execution;
pub(crate) mod evaluation;

pub use definition::ChallengeOperation;
