use fibre_injector::{class, Lifetime, Registry};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing_subscriber::EnvFilter;

// A simple service that gets a unique ID upon creation.
trait Tracker: Send + Sync {
  fn id(&self) -> usize;
}

struct RequestTracker {
  id: usize,
}
impl Tracker for RequestTracker {
  fn id(&self) -> usize {
    self.id
  }
}

class!(dyn Tracker);
class!(RequestTracker: dyn Tracker);

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn new_tracker() -> RequestTracker {
  RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  }
}

fn main() {
  // Show the registry's own log events; try RUST_LOG=fibre_injector=trace.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fibre_injector=debug")),
    )
    .init();

  // The lifetime can come from configuration.
  let lifetime: Lifetime = std::env::args()
    .nth(1)
    .and_then(|arg| arg.parse().ok())
    .unwrap_or(Lifetime::Singleton);

  let registry = Registry::new();
  registry
    .add::<dyn Tracker, RequestTracker>(lifetime, new_tracker)
    .expect("RequestTracker declares dyn Tracker as its superclass");

  println!("--- Resolving with lifetime '{}' ---", lifetime);
  let t1 = registry.resolve::<dyn Tracker>().expect("registered above");
  let t2 = registry.resolve::<dyn Tracker>().expect("registered above");
  println!("Instance 1 ID: {}, Instance 2 ID: {}", t1.id(), t2.id());

  match lifetime {
    Lifetime::Singleton => {
      assert!(Arc::ptr_eq(&t1, &t2), "Singleton instances should be identical");
      println!("Singleton instances are the same pointer, as expected.");
    }
    Lifetime::Transient => {
      assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");
      println!("Transient instances are different pointers, as expected.");
    }
  }
}
