//! The main `Registry` struct and its associated methods.

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::identity::{is_inherited_from, Class, Lineage, TypeIdentifier, Upcast};
use crate::lifetime::Lifetime;
use crate::registration::{Instance, Produced, Registration};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// The dependency-injection registry.
///
/// Maps a base type to the registration that produces it. It is thread-safe:
/// registrations can be added at any time from any thread, and concurrent
/// resolves of an uninitialized singleton construct it exactly once.
///
/// `Registry::default()` creates a new, empty registry like [`Registry::new`];
/// use [`global()`](crate::global) for the shared process-wide instance.
///
/// ```
/// use fibre_injector::{class, Registry};
///
/// trait Clock: Send + Sync {
///   fn now(&self) -> u64;
/// }
/// struct FixedClock;
/// impl Clock for FixedClock {
///   fn now(&self) -> u64 { 42 }
/// }
/// class!(dyn Clock);
/// class!(FixedClock: dyn Clock);
///
/// let registry = Registry::new();
/// registry.add_singleton::<dyn Clock, FixedClock>(|| FixedClock).unwrap();
///
/// let clock = registry.resolve::<dyn Clock>().unwrap();
/// assert_eq!(clock.now(), 42);
/// ```
#[derive(Default)]
pub struct Registry {
  registrations: DashMap<TypeIdentifier, Arc<Registration>>,
  config: RegistryConfig,
}

impl Registry {
  /// Creates a new, empty `Registry` with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: RegistryConfig) -> Self {
    Self {
      registrations: DashMap::new(),
      config,
    }
  }

  pub fn config(&self) -> &RegistryConfig {
    &self.config
  }

  // --- PRIVATE HELPERS ---

  fn insert(&self, base: TypeIdentifier, registration: Registration) {
    let implementation = registration.implementation();
    let lifetime = registration.lifetime();
    let previous = self.registrations.insert(base, Arc::new(registration));

    match previous {
      Some(previous) => debug!(
        registry = self.config.label_or_default(),
        base = base.name(),
        implementation = implementation.name(),
        replaced = previous.implementation().name(),
        ?lifetime,
        "overwrote registration"
      ),
      None => debug!(
        registry = self.config.label_or_default(),
        base = base.name(),
        implementation = implementation.name(),
        ?lifetime,
        "added registration"
      ),
    }
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers `I` as the implementation of `B` under `lifetime`.
  ///
  /// `factory` constructs the `I` itself and the registry upcasts it to `B`,
  /// so the recorded implementation is always the type that was built. The
  /// registry also checks that `I` declares `B` among its ancestors (unless the
  /// config disables it). Any earlier registration for `B` is replaced.
  ///
  /// A factory producing some other type does not compile:
  ///
  /// ```compile_fail
  /// use fibre_injector::{class, Registry};
  ///
  /// trait Base: Send + Sync {}
  /// struct Sub;
  /// struct NotRelated;
  /// impl Base for Sub {}
  /// impl Base for NotRelated {}
  /// class!(dyn Base);
  /// class!(Sub: dyn Base);
  /// class!(NotRelated: dyn Base);
  ///
  /// let registry = Registry::new();
  /// registry.add_singleton::<dyn Base, Sub>(|| NotRelated).unwrap();
  /// ```
  pub fn add<B, I>(
    &self,
    lifetime: Lifetime,
    factory: impl Fn() -> I + Send + Sync + 'static,
  ) -> Result<()>
  where
    B: ?Sized + Class + Send + Sync,
    I: Class + Upcast<B> + Send + Sync,
  {
    check_lineage::<B, I>(&self.config)?;
    let registration = Registration::new(
      TypeIdentifier::of::<I>(),
      lifetime,
      Box::new(move || {
        Box::new(<I as Upcast<B>>::upcast(Arc::new(factory()))) as Instance
      }),
    );
    self.insert(TypeIdentifier::of::<B>(), registration);
    Ok(())
  }

  pub fn add_transient<B, I>(
    &self,
    factory: impl Fn() -> I + Send + Sync + 'static,
  ) -> Result<()>
  where
    B: ?Sized + Class + Send + Sync,
    I: Class + Upcast<B> + Send + Sync,
  {
    self.add::<B, I>(Lifetime::Transient, factory)
  }

  pub fn add_singleton<B, I>(
    &self,
    factory: impl Fn() -> I + Send + Sync + 'static,
  ) -> Result<()>
  where
    B: ?Sized + Class + Send + Sync,
    I: Class + Upcast<B> + Send + Sync,
  {
    self.add::<B, I>(Lifetime::Singleton, factory)
  }

  // --- Resolution ---

  /// Resolves an instance of `B`.
  ///
  /// Transient registrations construct a new instance on every call. Singleton
  /// registrations construct on the first call and return the cached instance
  /// afterwards.
  ///
  /// # Errors
  ///
  /// - [`Error::UnresolvableDependency`] if `B` was never registered, or its
  ///   registration does not hold a `B`.
  /// - [`Error::UnexpectedState`] if the registration's lifetime is corrupt.
  pub fn resolve<B: ?Sized + 'static>(&self) -> Result<Arc<B>> {
    let key = TypeIdentifier::of::<B>();

    // Clone the registration out so no shard lock is held while the factory
    // runs; factories are free to resolve or register other services.
    let registration = self
      .registrations
      .get(&key)
      .map(|entry| Arc::clone(entry.value()));

    let Some(registration) = registration else {
      warn!(
        registry = self.config.label_or_default(),
        base = key.name(),
        "no registration found"
      );
      return Err(Error::UnresolvableDependency(key));
    };

    let produced = registration.produce().ok_or_else(|| {
      error!(
        registry = self.config.label_or_default(),
        base = key.name(),
        code = registration.lifetime_code(),
        "registration has an unknown lifetime"
      );
      Error::UnexpectedState {
        key,
        code: registration.lifetime_code(),
      }
    })?;

    let instance = match produced {
      Produced::Shared(instance) => {
        trace!(base = key.name(), "resolved singleton");
        instance.downcast_ref::<Arc<B>>().cloned()
      }
      Produced::Fresh(instance) => {
        trace!(base = key.name(), "constructed transient");
        instance.downcast::<Arc<B>>().ok().map(|boxed| *boxed)
      }
    };

    instance.ok_or_else(|| {
      warn!(
        registry = self.config.label_or_default(),
        base = key.name(),
        implementation = registration.implementation().name(),
        "registration does not hold an instance of the base type"
      );
      Error::UnresolvableDependency(key)
    })
  }

  // --- Introspection ---

  pub fn contains<B: ?Sized + 'static>(&self) -> bool {
    self.registrations.contains_key(&TypeIdentifier::of::<B>())
  }

  /// Returns the current registration for `B`, if any.
  pub fn registration<B: ?Sized + 'static>(&self) -> Option<Arc<Registration>> {
    self
      .registrations
      .get(&TypeIdentifier::of::<B>())
      .map(|entry| Arc::clone(entry.value()))
  }

  pub fn len(&self) -> usize {
    self.registrations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registrations.is_empty()
  }
}

/// Checks that `I` declares `B` among its ancestors, unless `config` turns
/// validation off.
pub(crate) fn check_lineage<B: ?Sized + Class, I: Class>(config: &RegistryConfig) -> Result<()> {
  if !config.validate_inheritance {
    return Ok(());
  }
  let base = TypeIdentifier::of::<B>();
  let implementation = Lineage::of::<I>();
  if is_inherited_from(base, implementation) {
    return Ok(());
  }
  warn!(
    registry = config.label_or_default(),
    base = base.name(),
    implementation = implementation.id().name(),
    "rejected registration: implementation does not inherit from base"
  );
  Err(Error::CannotRegisterDependency {
    base,
    implementation: implementation.id(),
  })
}
