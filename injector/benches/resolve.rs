use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fibre_injector::{class, Registry};
use std::thread;

trait Service: Send + Sync {
  fn value(&self) -> u64;
}

struct Impl(u64);
impl Service for Impl {
  fn value(&self) -> u64 {
    self.0
  }
}

class!(dyn Service);
class!(Impl: dyn Service);

fn bench_resolve(c: &mut Criterion) {
  let mut group = c.benchmark_group("resolve");

  let singleton = Registry::new();
  singleton
    .add_singleton::<dyn Service, Impl>(|| Impl(7))
    .unwrap();
  group.bench_function("singleton_cached", |b| {
    b.iter(|| black_box(singleton.resolve::<dyn Service>().unwrap().value()))
  });

  let transient = Registry::new();
  transient
    .add_transient::<dyn Service, Impl>(|| Impl(7))
    .unwrap();
  group.bench_function("transient", |b| {
    b.iter(|| black_box(transient.resolve::<dyn Service>().unwrap().value()))
  });

  group.bench_function("miss", |b| {
    let empty = Registry::new();
    b.iter(|| black_box(empty.resolve::<dyn Service>().is_err()))
  });

  // Resolution while four other threads hammer the same singleton.
  group.bench_function("singleton_contended", |b| {
    b.iter_custom(|iters| {
      let start = std::time::Instant::now();
      thread::scope(|s| {
        for _ in 0..4 {
          s.spawn(|| {
            for _ in 0..iters {
              black_box(singleton.resolve::<dyn Service>().unwrap());
            }
          });
        }
      });
      start.elapsed()
    })
  });

  group.finish();
}

fn bench_add(c: &mut Criterion) {
  let registry = Registry::new();
  c.bench_function("add_singleton_overwrite", |b| {
    b.iter(|| {
      registry
        .add_singleton::<dyn Service, Impl>(|| Impl(1))
        .unwrap()
    })
  });
}

criterion_group!(benches, bench_resolve, bench_add);
criterion_main!(benches);
