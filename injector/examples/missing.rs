use fibre_injector::{global, resolve, Error};
use std::panic;

trait UnregisteredService: Send + Sync {}

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(dyn UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `resolve()` method ---
  println!("\nNow, attempting to resolve using the fallible `resolve()` method...");

  match global().resolve::<dyn UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(Error::UnresolvableDependency(key)) => {
      println!("Correctly received an error for the missing service: {}", key)
    }
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
