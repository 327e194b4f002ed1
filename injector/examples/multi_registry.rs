use fibre_injector::{class, global, Error, Registry};

trait DataSource: Send + Sync {
  fn read(&self) -> String;
}

struct FixtureSource;
impl DataSource for FixtureSource {
  fn read(&self) -> String {
    "test data".to_string()
  }
}

class!(dyn DataSource);
class!(FixtureSource: dyn DataSource);

// A function that configures dependencies and runs some logic.
// By accepting a `&Registry`, it can be exercised in a controlled environment.
fn process_data(registry: &Registry) -> Result<String, Error> {
  // Register a data source ONLY within this registry.
  registry.add_singleton::<dyn DataSource, FixtureSource>(|| FixtureSource)?;

  let source = registry.resolve::<dyn DataSource>()?;
  Ok(format!("Processed: {}", source.read().to_uppercase()))
}

fn main() -> Result<(), Error> {
  println!("--- Running with a local registry ---");
  let test_registry = Registry::new();
  let result = process_data(&test_registry)?;

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // The service registered in `test_registry` must not exist in the global registry.
  match global().resolve::<dyn DataSource>() {
    Err(Error::UnresolvableDependency(key)) => {
      println!("\nGlobal registry has no {}: registries are isolated.", key)
    }
    Err(other) => return Err(other),
    Ok(_) => panic!("Dependency should not have leaked into the global registry!"),
  }
  Ok(())
}
