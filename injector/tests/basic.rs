use fibre_injector::{class, Error, Lifetime, Registry, RegistryConfig, TypeIdentifier, Upcast};
use std::rc::Rc;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Test Fixtures ---

trait Base: Send + Sync {
  fn name(&self) -> &'static str;
}

struct Sub;
impl Base for Sub {
  fn name(&self) -> &'static str {
    "sub"
  }
}

// Implements the trait and can be upcast to it, but declares no lineage.
struct NotRelated;
impl Base for NotRelated {
  fn name(&self) -> &'static str {
    "not related"
  }
}

class!(dyn Base);
class!(Sub: dyn Base);
class!(NotRelated);

impl Upcast<dyn Base> for NotRelated {
  fn upcast(self: Arc<Self>) -> Arc<dyn Base> {
    self
  }

  fn upcast_rc(self: Rc<Self>) -> Rc<dyn Base> {
    self
  }
}

// --- Basic Tests ---

#[test]
fn test_add_stores_registration() {
  // Arrange
  let registry = Registry::new();
  assert!(registry.is_empty());

  // Act
  registry
    .add_singleton::<dyn Base, Sub>(|| Sub)
    .unwrap();

  // Assert
  assert!(registry.contains::<dyn Base>());
  assert_eq!(registry.len(), 1);
  let registration = registry.registration::<dyn Base>().unwrap();
  assert_eq!(registration.implementation(), TypeIdentifier::of::<Sub>());
  assert_eq!(registration.lifetime(), Some(Lifetime::Singleton));
}

#[test]
fn test_add_rejects_unrelated_implementation() {
  let registry = Registry::new();

  let result = registry.add_singleton::<dyn Base, NotRelated>(|| NotRelated);

  match result {
    Err(Error::CannotRegisterDependency {
      base,
      implementation,
    }) => {
      assert_eq!(base, TypeIdentifier::of::<dyn Base>());
      assert_eq!(implementation, TypeIdentifier::of::<NotRelated>());
    }
    other => panic!("expected CannotRegisterDependency, got {:?}", other),
  }
  assert!(!registry.contains::<dyn Base>());
}

#[test]
fn test_registration_records_the_constructed_implementation() {
  let registry = Registry::new();
  registry.add_transient::<dyn Base, Sub>(|| Sub).unwrap();

  let registration = registry.registration::<dyn Base>().unwrap();
  assert_eq!(registration.implementation(), TypeIdentifier::of::<Sub>());
  assert_eq!(registry.resolve::<dyn Base>().unwrap().name(), "sub");

  // Even with validation off, the recorded implementation is the built type.
  let unchecked = Registry::with_config(RegistryConfig::new().validate_inheritance(false));
  unchecked
    .add_transient::<dyn Base, NotRelated>(|| NotRelated)
    .unwrap();

  let registration = unchecked.registration::<dyn Base>().unwrap();
  assert_eq!(registration.implementation(), TypeIdentifier::of::<NotRelated>());
  assert_eq!(unchecked.resolve::<dyn Base>().unwrap().name(), "not related");
}

#[test]
fn test_resolves_registered_singleton() {
  // Arrange
  let registry = Registry::new();
  registry
    .add_singleton::<dyn Base, Sub>(|| Sub)
    .unwrap();

  // Act
  let r1 = registry.resolve::<dyn Base>().unwrap();
  let r2 = registry.resolve::<dyn Base>().unwrap();

  // Assert
  assert_eq!(r1.name(), "sub");
  // Ensure it's a singleton by checking pointer equality.
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_singleton_constructed_once() {
  static CONSTRUCT_COUNT: AtomicUsize = AtomicUsize::new(0);

  struct Counted;
  impl Base for Counted {
    fn name(&self) -> &'static str {
      "counted"
    }
  }
  class!(Counted: dyn Base);

  let registry = Registry::new();
  registry
    .add_singleton::<dyn Base, Counted>(|| {
      CONSTRUCT_COUNT.fetch_add(1, Ordering::SeqCst);
      Counted
    })
    .unwrap();

  let first = registry.resolve::<dyn Base>().unwrap();
  for _ in 0..5 {
    let instance = registry.resolve::<dyn Base>().unwrap();
    assert_eq!(instance.name(), "counted");
    assert!(Arc::ptr_eq(&first, &instance));
  }

  assert_eq!(CONSTRUCT_COUNT.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_constructed_every_time() {
  static CONSTRUCT_COUNT: AtomicUsize = AtomicUsize::new(0);

  struct Transient;
  impl Base for Transient {
    fn name(&self) -> &'static str {
      "transient"
    }
  }
  class!(Transient: dyn Base);

  let registry = Registry::new();
  registry
    .add_transient::<dyn Base, Transient>(|| {
      CONSTRUCT_COUNT.fetch_add(1, Ordering::SeqCst);
      Transient
    })
    .unwrap();

  let resolve_count = 5;
  let instances: Vec<Arc<dyn Base>> = (0..resolve_count)
    .map(|_| registry.resolve::<dyn Base>().unwrap())
    .collect();

  for (i, a) in instances.iter().enumerate() {
    assert_eq!(a.name(), "transient");
    for b in &instances[i + 1..] {
      assert!(!Arc::ptr_eq(a, b));
    }
  }
  assert_eq!(CONSTRUCT_COUNT.load(Ordering::SeqCst), resolve_count);
}

#[test]
fn test_resolve_missing_is_unresolvable() {
  let registry = Registry::new();

  let err = registry.resolve::<dyn Base>().err().unwrap();

  assert!(matches!(err, Error::UnresolvableDependency(key) if key == TypeIdentifier::of::<dyn Base>()));
  assert!(!err.is_internal());
  assert!(err.to_string().contains("Base"));
}

#[test]
fn test_add_with_explicit_lifetime() {
  let registry = Registry::new();
  registry
    .add::<dyn Base, Sub>(Lifetime::Transient, || Sub)
    .unwrap();

  let r1 = registry.resolve::<dyn Base>().unwrap();
  let r2 = registry.resolve::<dyn Base>().unwrap();
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_lifetime_from_config_string() {
  let lifetime: Lifetime = "singleton".parse().unwrap();
  let registry = Registry::new();
  registry
    .add::<dyn Base, Sub>(lifetime, || Sub)
    .unwrap();

  let r1 = registry.resolve::<dyn Base>().unwrap();
  let r2 = registry.resolve::<dyn Base>().unwrap();
  assert!(Arc::ptr_eq(&r1, &r2));
}
