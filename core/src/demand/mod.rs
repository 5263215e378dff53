// opchain/src/demand/mod.rs

//! Defines the `DemandOperation<T, E>` chain: break guards, the main action, lower
//! execution reflection, failure accumulation and finalization.

pub mod definition;
pub mod execution;
pub mod extension;
pub mod guards;

// Re-export the main chain struct and its in-flight adapter
pub use definition::DemandOperation;
pub use extension::PendingDemandOperation;
