use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use opchain::{DemandOperation, ExecutionPolicy, OperationBuilder, OperationError};
use tokio::runtime::Runtime; // To run async code within Criterion

// --- Common Benchmark Error ---
#[derive(Debug, Clone, thiserror::Error)]
enum BenchError {
  #[error("bench failure {0}")]
  Failed(u64),
}

fn flatten_bench_error(err: &BenchError) -> String {
  match err {
    BenchError::Failed(code) => format!("code {}", code),
  }
}

// --- Helper: a demand chain with `guards` passing guards and one action ---
fn run_guarded_chain(guards: u64, iterations: u64) -> Result<u64, OperationError> {
  let mut chain = OperationBuilder::create_demand_operation::<u64, BenchError>();
  for idx in 0..guards {
    chain = chain.break_if(move || Ok(idx == u64::MAX), None)?;
  }
  let result = chain
    .execute(move || {
      let mut acc = 0u64;
      for i in 0..iterations {
        // Simulate some CPU-bound work
        acc = acc.wrapping_add(i);
      }
      Ok(acc)
    })?
    .get_result()?;
  Ok(result.into_value().unwrap_or_default())
}

// --- Benchmark Functions ---

fn bench_demand_guards(c: &mut Criterion) {
  let mut group = c.benchmark_group("DemandGuards");
  for guards in [0u64, 1, 10, 100].iter() {
    group.throughput(Throughput::Elements(*guards));
    group.bench_with_input(BenchmarkId::from_parameter(guards), guards, |b, &g| {
      b.iter(|| run_guarded_chain(g, 10));
    });
  }
  group.finish();
}

fn bench_failure_accumulation(c: &mut Criterion) {
  let mut group = c.benchmark_group("FailureAccumulation");
  for failures in [1u64, 10, 100].iter() {
    group.throughput(Throughput::Elements(*failures));
    group.bench_with_input(BenchmarkId::from_parameter(failures), failures, |b, &n| {
      b.iter(|| {
        let mut chain = DemandOperation::<u64, BenchError>::new().with_policy(ExecutionPolicy::Idempotent);
        for code in 0..n {
          chain = chain.execute(move || Err(BenchError::Failed(code)))?;
        }
        chain.flat_exception(flatten_bench_error)?.get_result()
      });
    });
  }
  group.finish();
}

fn bench_challenge_groups(c: &mut Criterion) {
  let mut group = c.benchmark_group("ChallengeGroups");
  for members in [1usize, 10, 50].iter() {
    group.bench_with_input(BenchmarkId::new("and_group", members), members, |b, &m| {
      b.iter(|| {
        let mut operation = OperationBuilder::create_challenge_operation::<String, BenchError>()
          .set_operation(|| Ok("Hello Well".to_string()))?
          .set_challenge(|r: &String| r.contains("We"), "no We")?;
        for _ in 0..m {
          operation = operation.set_and_success_if(|r: &String| r.ends_with('l'), "no l")?;
        }
        operation.execute()
      });
    });
    group.bench_with_input(BenchmarkId::new("or_group", members), members, |b, &m| {
      b.iter(|| {
        let mut operation = OperationBuilder::create_challenge_operation::<String, BenchError>()
          .set_operation(|| Ok("Hello Well".to_string()))?
          .set_challenge(|r: &String| r.is_empty(), "not empty")?;
        for _ in 0..m {
          operation = operation.set_or_success_if(|r: &String| r.starts_with('x'), None)?;
        }
        operation.execute()
      });
    });
  }
  group.finish();
}

fn bench_async_execution(c: &mut Criterion) {
  let rt = Runtime::new().expect("Failed to create Tokio runtime for benchmarks");
  let mut group = c.benchmark_group("AsyncExecution");
  for delay_micros in [0u64, 10].iter() {
    group.bench_with_input(BenchmarkId::from_parameter(delay_micros), delay_micros, |b, &d| {
      b.to_async(&rt).iter(|| async move {
        OperationBuilder::create_demand_operation::<u64, BenchError>()
          .break_if_async(|| async { Ok(false) }, None)
          .await?
          .execute_async(|| async move {
            if d > 0 {
              tokio::time::sleep(std::time::Duration::from_micros(d)).await;
            }
            Ok(d)
          })
          .await?
          .get_result()
      });
    });
  }
  group.finish();
}

criterion_group!(
  benches,
  bench_demand_guards,
  bench_failure_accumulation,
  bench_challenge_groups,
  bench_async_execution
);
criterion_main!(benches);
