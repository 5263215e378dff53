// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use opchain::FailureCause;
use parking_lot::Mutex;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Value was empty: {0}")]
  Empty(String),

  #[error("Value was null: {0}")]
  Null(String),

  #[error("Invalid input: {0}")]
  Invalid(String),

  #[error("Task was cancelled")]
  Cancelled,
}

/// Total formatter over `TestError`, the way an application would flatten its errors.
pub fn flatten_test_error(err: &TestError) -> String {
  match err {
    TestError::Empty(_) => "Empty".to_string(),
    TestError::Null(_) => "Null".to_string(),
    TestError::Invalid(what) => format!("Please check {}", what),
    TestError::Cancelled => "Cancelled".to_string(),
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static ACTION_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));
pub static GUARD_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  ACTION_EXEC_COUNTER.store(0, Ordering::SeqCst);
  GUARD_EXEC_COUNTER.store(0, Ordering::SeqCst);
}

pub fn action_runs() -> usize {
  ACTION_EXEC_COUNTER.load(Ordering::SeqCst)
}

pub fn guard_runs() -> usize {
  GUARD_EXEC_COUNTER.load(Ordering::SeqCst)
}

// --- Common Action Creators ---
pub fn counted_action(value: &'static str) -> impl FnOnce() -> Result<String, TestError> {
  move || {
    ACTION_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(target: "test_actions", value, "action executed");
    Ok(value.to_string())
  }
}

pub fn counted_guard(verdict: bool) -> impl FnOnce() -> Result<bool, TestError> {
  move || {
    GUARD_EXEC_COUNTER.fetch_add(1, Ordering::SeqCst);
    Ok(verdict)
  }
}

/// A predicate that counts its calls before answering.
pub fn counted_predicate(answer: bool, calls: Arc<AtomicUsize>) -> impl Fn(&String) -> bool + Send + Sync + 'static {
  move |_value: &String| {
    calls.fetch_add(1, Ordering::SeqCst);
    answer
  }
}

/// An exception observer recording the text of every cause it sees.
pub fn recording_observer() -> (
  Arc<Mutex<Vec<String>>>,
  impl FnMut(&FailureCause<TestError>) + Send + 'static,
) {
  let seen = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&seen);
  let observer = move |cause: &FailureCause<TestError>| sink.lock().push(cause.to_string());
  (seen, observer)
}
