// injector/src/local_registry.rs

//! A single-threaded, non-thread-safe dependency-injection registry.

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::identity::{Class, TypeIdentifier, Upcast};
use crate::lifetime::Lifetime;
use crate::registry::check_lineage;
use once_cell::unsync::OnceCell;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// The single-threaded counterpart of [`Registration`](crate::Registration).
///
/// Exposes the same introspection; the cached instance is an `Rc` held in an
/// `unsync::OnceCell`.
pub struct LocalRegistration {
  implementation: TypeIdentifier,
  lifetime: u8,
  factory: Box<dyn Fn() -> Box<dyn Any>>,
  instance: OnceCell<Box<dyn Any>>,
}

impl LocalRegistration {
  pub fn implementation(&self) -> TypeIdentifier {
    self.implementation
  }

  /// The lifetime policy, or `None` if the stored code is not a known lifetime.
  pub fn lifetime(&self) -> Option<Lifetime> {
    Lifetime::from_code(self.lifetime)
  }

  pub fn is_instantiated(&self) -> bool {
    self.instance.get().is_some()
  }
}

impl fmt::Debug for LocalRegistration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LocalRegistration")
      .field("implementation", &self.implementation)
      .field("lifetime", &self.lifetime())
      .field("instantiated", &self.is_instantiated())
      .finish()
  }
}

/// A single-threaded, non-thread-safe dependency-injection registry.
///
/// Behaves like [`Registry`](crate::Registry) but hands out `Rc` handles and
/// can store types that are neither `Send` nor `Sync`. Registration takes
/// `&mut self` because the store is a plain `HashMap`.
#[derive(Default)]
pub struct LocalRegistry {
  registrations: HashMap<TypeIdentifier, Rc<LocalRegistration>>,
  config: RegistryConfig,
}

impl LocalRegistry {
  /// Creates a new, empty `LocalRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: RegistryConfig) -> Self {
    Self {
      registrations: HashMap::new(),
      config,
    }
  }

  pub fn config(&self) -> &RegistryConfig {
    &self.config
  }

  // --- Registration ---

  /// Registers `I` as the implementation of `B`. `factory` builds the `I`,
  /// which is upcast to `B`, as in [`Registry::add`](crate::Registry::add).
  pub fn add<B, I>(&mut self, lifetime: Lifetime, factory: impl Fn() -> I + 'static) -> Result<()>
  where
    B: ?Sized + Class,
    I: Class + Upcast<B>,
  {
    check_lineage::<B, I>(&self.config)?;
    let base = TypeIdentifier::of::<B>();
    let registration = LocalRegistration {
      implementation: TypeIdentifier::of::<I>(),
      lifetime: lifetime.code(),
      factory: Box::new(move || {
        Box::new(<I as Upcast<B>>::upcast_rc(Rc::new(factory()))) as Box<dyn Any>
      }),
      instance: OnceCell::new(),
    };
    let replaced = self.registrations.insert(base, Rc::new(registration)).is_some();
    debug!(
      registry = self.config.label_or_default(),
      base = base.name(),
      implementation = std::any::type_name::<I>(),
      %lifetime,
      replaced,
      "added local registration"
    );
    Ok(())
  }

  pub fn add_transient<B, I>(&mut self, factory: impl Fn() -> I + 'static) -> Result<()>
  where
    B: ?Sized + Class,
    I: Class + Upcast<B>,
  {
    self.add::<B, I>(Lifetime::Transient, factory)
  }

  pub fn add_singleton<B, I>(&mut self, factory: impl Fn() -> I + 'static) -> Result<()>
  where
    B: ?Sized + Class,
    I: Class + Upcast<B>,
  {
    self.add::<B, I>(Lifetime::Singleton, factory)
  }

  // --- Resolution ---

  /// Resolves an instance of `B`, with the same errors as
  /// [`Registry::resolve`](crate::Registry::resolve).
  pub fn resolve<B: ?Sized + 'static>(&self) -> Result<Rc<B>> {
    let key = TypeIdentifier::of::<B>();
    let Some(registration) = self.registrations.get(&key).cloned() else {
      warn!(
        registry = self.config.label_or_default(),
        base = key.name(),
        "no local registration found"
      );
      return Err(Error::UnresolvableDependency(key));
    };

    let instance = match Lifetime::from_code(registration.lifetime) {
      Some(Lifetime::Singleton) => registration
        .instance
        .get_or_init(|| (registration.factory)())
        .downcast_ref::<Rc<B>>()
        .cloned(),
      Some(Lifetime::Transient) => (registration.factory)()
        .downcast::<Rc<B>>()
        .ok()
        .map(|boxed| *boxed),
      None => {
        error!(
          registry = self.config.label_or_default(),
          base = key.name(),
          code = registration.lifetime,
          "local registration has an unknown lifetime"
        );
        return Err(Error::UnexpectedState {
          key,
          code: registration.lifetime,
        });
      }
    };

    instance.ok_or_else(|| {
      warn!(
        registry = self.config.label_or_default(),
        base = key.name(),
        implementation = registration.implementation.name(),
        "local registration does not hold an instance of the base type"
      );
      Error::UnresolvableDependency(key)
    })
  }

  // --- Introspection ---

  pub fn contains<B: ?Sized + 'static>(&self) -> bool {
    self.registrations.contains_key(&TypeIdentifier::of::<B>())
  }

  /// Returns the current registration for `B`, if any.
  pub fn registration<B: ?Sized + 'static>(&self) -> Option<Rc<LocalRegistration>> {
    self.registrations.get(&TypeIdentifier::of::<B>()).cloned()
  }

  pub fn len(&self) -> usize {
    self.registrations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registrations.is_empty()
  }
}
