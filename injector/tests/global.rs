// This binary holds a single test so nothing else can touch the process-wide
// registry before it checks that the registry is created lazily.

use fibre_injector::{class, global, is_global_initialized, Registry};
use std::sync::Arc;
use std::thread;

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct EnglishGreeter;
impl Greeter for EnglishGreeter {
  fn greet(&self) -> String {
    "Hello!".to_string()
  }
}

class!(dyn Greeter);
class!(EnglishGreeter: dyn Greeter);

#[test]
fn test_global_is_created_lazily_and_reused() {
  // Working with another registry must not create the global one.
  let local = Registry::new();
  local
    .add_singleton::<dyn Greeter, EnglishGreeter>(|| EnglishGreeter)
    .unwrap();
  assert!(local.resolve::<dyn Greeter>().is_ok());
  assert!(!is_global_initialized());

  // Racing first accesses all observe one instance.
  let addresses: Vec<usize> = thread::scope(|s| {
    let handles: Vec<_> = (0..8)
      .map(|_| s.spawn(|| global() as *const Registry as usize))
      .collect();
    handles.into_iter().map(|h| h.join().unwrap()).collect()
  });
  assert!(is_global_initialized());

  let first = global();
  for address in addresses {
    assert_eq!(address, first as *const Registry as usize);
  }
  assert!(std::ptr::eq(first, global()));

  // The global registry is independent from `local`.
  assert!(global().resolve::<dyn Greeter>().is_err());
  global()
    .add_singleton::<dyn Greeter, EnglishGreeter>(|| EnglishGreeter)
    .unwrap();
  let g1 = global().resolve::<dyn Greeter>().unwrap();
  let g2 = global().resolve::<dyn Greeter>().unwrap();
  assert_eq!(g1.greet(), "Hello!");
  assert!(Arc::ptr_eq(&g1, &g2));

  // `Registry::default()` builds a fresh registry, never the shared one.
  let fresh = Registry::default();
  assert!(!std::ptr::eq(&fresh, global()));
  assert!(fresh.is_empty());
  assert!(fresh.resolve::<dyn Greeter>().is_err());
  assert!(global().contains::<dyn Greeter>());
}
