//! The stored registration record.

use crate::identity::TypeIdentifier;
use crate::lifetime::Lifetime;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;

/// A type-erased instance. Always holds an `Arc<B>` for the base `B` it was
/// registered under.
pub(crate) type Instance = Box<dyn Any + Send + Sync>;
pub(crate) type Factory = Box<dyn Fn() -> Instance + Send + Sync>;

/// What a registration produced for one resolve call.
pub(crate) enum Produced<'a> {
  /// The singleton instance, constructed now or on an earlier call.
  Shared(&'a Instance),
  /// A freshly constructed transient instance.
  Fresh(Instance),
}

/// The association of a base type with its implementation, lifetime and, for
/// singletons, the cached instance.
///
/// The cached instance is set at most once and is never replaced; a new
/// registration for the same base creates a new record instead.
pub struct Registration {
  implementation: TypeIdentifier,
  // Stored as the `Lifetime` code and decoded on every resolve.
  lifetime: u8,
  factory: Factory,
  instance: OnceCell<Instance>,
}

impl Registration {
  pub(crate) fn new(implementation: TypeIdentifier, lifetime: Lifetime, factory: Factory) -> Self {
    Self::with_code(implementation, lifetime.code(), factory)
  }

  pub(crate) fn with_code(implementation: TypeIdentifier, lifetime: u8, factory: Factory) -> Self {
    Self {
      implementation,
      lifetime,
      factory,
      instance: OnceCell::new(),
    }
  }

  /// The implementation type this registration constructs.
  pub fn implementation(&self) -> TypeIdentifier {
    self.implementation
  }

  /// The lifetime policy, or `None` if the stored code is not a known lifetime.
  pub fn lifetime(&self) -> Option<Lifetime> {
    Lifetime::from_code(self.lifetime)
  }

  pub(crate) fn lifetime_code(&self) -> u8 {
    self.lifetime
  }

  /// `true` once a singleton has been constructed. Always `false` for transients.
  pub fn is_instantiated(&self) -> bool {
    self.instance.get().is_some()
  }

  /// Produces an instance according to the lifetime policy.
  ///
  /// Returns `None` if the lifetime code is unknown. Concurrent callers on an
  /// uninitialized singleton block until the single construction finishes and
  /// all receive that instance.
  pub(crate) fn produce(&self) -> Option<Produced<'_>> {
    match self.lifetime()? {
      Lifetime::Transient => Some(Produced::Fresh((self.factory)())),
      Lifetime::Singleton => Some(Produced::Shared(
        self.instance.get_or_init(|| (self.factory)()),
      )),
    }
  }
}

impl fmt::Debug for Registration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registration")
      .field("implementation", &self.implementation)
      .field("lifetime", &self.lifetime())
      .field("instantiated", &self.is_instantiated())
      .finish()
  }
}
