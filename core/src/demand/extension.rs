// opchain/src/demand/extension.rs

//! Adapters letting a chain keep going while it is still an in-flight future, e.g.
//! straight after `break_if_async` or `execute_async` without an intermediate `.await?`.

use crate::core::failure::FailureCause;
use crate::core::result::OperationResult;
use crate::demand::definition::DemandOperation;
use crate::error::OpResult;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;

/// Continuations on a not-yet-awaited `DemandOperation<T, E>`.
///
/// Every method awaits the pending chain, returns its usage error if it has one,
/// and otherwise delegates to the method of the same name on the chain.
///
/// ```
/// use opchain::{DemandOperation, PendingDemandOperation};
///
/// # async fn run() -> Result<(), opchain::OperationError> {
/// let result = DemandOperation::<u32>::new()
///   .break_if_async(|| async { Ok(false) }, None)
///   .execute_future(async { Ok(7) })
///   .get_result()
///   .await?;
/// assert_eq!(result.value(), Some(&7));
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PendingDemandOperation<T, E>: Sized + Send
where
  T: Send + 'static,
  E: fmt::Display + Send + 'static,
{
  async fn break_if<P>(self, predicate: P, message: Option<&str>) -> OpResult<DemandOperation<T, E>>
  where
    P: FnOnce() -> Result<bool, E> + Send + 'static;

  async fn break_if_async<P, Fut>(self, predicate: P, message: Option<&str>) -> OpResult<DemandOperation<T, E>>
  where
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<bool, E>> + Send + 'static;

  async fn break_if_throws_any<A, R>(self, action: A, message: &str) -> OpResult<DemandOperation<T, E>>
  where
    A: FnOnce() -> Result<R, E> + Send + 'static;

  async fn execute<A>(self, action: A) -> OpResult<DemandOperation<T, E>>
  where
    A: FnOnce() -> Result<T, E> + Send + 'static;

  async fn execute_async<A, Fut>(self, action: A) -> OpResult<DemandOperation<T, E>>
  where
    A: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static;

  async fn execute_future<Fut>(self, future: Fut) -> OpResult<DemandOperation<T, E>>
  where
    Fut: Future<Output = Result<T, E>> + Send + 'static;

  async fn reflect_lower_execution<S>(self, supplier: S) -> OpResult<DemandOperation<T, E>>
  where
    S: FnOnce() -> OperationResult<T, E> + Send + 'static;

  async fn reflect_lower_execution_async<S, Fut>(self, supplier: S) -> OpResult<DemandOperation<T, E>>
  where
    S: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = OperationResult<T, E>> + Send + 'static;

  async fn on_exception<O>(self, observer: O) -> OpResult<DemandOperation<T, E>>
  where
    O: FnMut(&FailureCause<E>) + Send + 'static;

  async fn flat_exception<F>(self, formatter: F) -> OpResult<DemandOperation<T, E>>
  where
    F: Fn(&E) -> String + Send + Sync + 'static;

  async fn get_result(self) -> OpResult<OperationResult<T, E>>;
}

#[async_trait]
impl<T, E, Pending> PendingDemandOperation<T, E> for Pending
where
  T: Send + 'static,
  E: fmt::Display + Send + 'static,
  Pending: Future<Output = OpResult<DemandOperation<T, E>>> + Send,
{
  async fn break_if<P>(self, predicate: P, message: Option<&str>) -> OpResult<DemandOperation<T, E>>
  where
    P: FnOnce() -> Result<bool, E> + Send + 'static,
  {
    self.await?.break_if(predicate, message)
  }

  async fn break_if_async<P, Fut>(self, predicate: P, message: Option<&str>) -> OpResult<DemandOperation<T, E>>
  where
    P: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<bool, E>> + Send + 'static,
  {
    self.await?.break_if_async(predicate, message).await
  }

  async fn break_if_throws_any<A, R>(self, action: A, message: &str) -> OpResult<DemandOperation<T, E>>
  where
    A: FnOnce() -> Result<R, E> + Send + 'static,
  {
    self.await?.break_if_throws_any(action, message)
  }

  async fn execute<A>(self, action: A) -> OpResult<DemandOperation<T, E>>
  where
    A: FnOnce() -> Result<T, E> + Send + 'static,
  {
    self.await?.execute(action)
  }

  async fn execute_async<A, Fut>(self, action: A) -> OpResult<DemandOperation<T, E>>
  where
    A: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
  {
    self.await?.execute_async(action).await
  }

  async fn execute_future<Fut>(self, future: Fut) -> OpResult<DemandOperation<T, E>>
  where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
  {
    self.await?.execute_future(future).await
  }

  async fn reflect_lower_execution<S>(self, supplier: S) -> OpResult<DemandOperation<T, E>>
  where
    S: FnOnce() -> OperationResult<T, E> + Send + 'static,
  {
    self.await?.reflect_lower_execution(supplier)
  }

  async fn reflect_lower_execution_async<S, Fut>(self, supplier: S) -> OpResult<DemandOperation<T, E>>
  where
    S: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = OperationResult<T, E>> + Send + 'static,
  {
    self.await?.reflect_lower_execution_async(supplier).await
  }

  async fn on_exception<O>(self, observer: O) -> OpResult<DemandOperation<T, E>>
  where
    O: FnMut(&FailureCause<E>) + Send + 'static,
  {
    self.await?.on_exception(observer)
  }

  async fn flat_exception<F>(self, formatter: F) -> OpResult<DemandOperation<T, E>>
  where
    F: Fn(&E) -> String + Send + Sync + 'static,
  {
    self.await?.flat_exception(formatter)
  }

  async fn get_result(self) -> OpResult<OperationResult<T, E>> {
    self.await?.get_result()
  }
}
