//! Type identity and declared lineage.
//!
//! Registrations are keyed by the base type's `TypeId`. Inheritance between a
//! base and an implementation is not something Rust can inspect at runtime, so
//! each registrable type declares its supertype through the [`Class`] trait and
//! the registry walks that declared chain when validating a registration.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

/// The key a registration is stored under.
///
/// Equality and hashing only consider the `TypeId`; the name is kept for
/// diagnostics and error messages.
#[derive(Clone, Copy)]
pub struct TypeIdentifier {
  id: TypeId,
  name: &'static str,
}

impl TypeIdentifier {
  /// Returns the identifier of `T`. Works for trait objects such as `dyn Base`.
  pub fn of<T: ?Sized + 'static>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.id
  }

  /// The fully qualified type name, as reported by `std::any::type_name`.
  pub fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeIdentifier {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeIdentifier {}

impl Hash for TypeIdentifier {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeIdentifier({})", self.name)
  }
}

impl fmt::Display for TypeIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// A type that can take part in a registration, either as a base or as an
/// implementation.
///
/// The default implementation declares no supertype, which makes the type a
/// root of its own hierarchy. Use the [`class!`](crate::class) macro to
/// implement it.
///
/// ```
/// use fibre_injector::{class, Class, Lineage};
///
/// trait Storage: Send + Sync {}
/// struct DiskStorage;
/// impl Storage for DiskStorage {}
///
/// class!(dyn Storage);
/// class!(DiskStorage: dyn Storage);
///
/// assert!(Lineage::of::<DiskStorage>().descends_from::<dyn Storage>());
/// ```
pub trait Class: 'static {
  /// The declared supertype of `Self`, or `None` if the chain ends here.
  fn superclass() -> Option<Lineage> {
    None
  }
}

/// Converts a shared handle to an implementation into a handle to one of its
/// bases.
///
/// The registry constructs the implementation itself and upcasts it, so a
/// factory can only ever produce the type whose lineage was checked.
/// [`class!`](crate::class) implements this for the declared superclass and
/// any extra ancestors it lists. Every type upcasts to itself.
pub trait Upcast<B: ?Sized> {
  fn upcast(self: Arc<Self>) -> Arc<B>;
  fn upcast_rc(self: Rc<Self>) -> Rc<B>;
}

impl<T> Upcast<T> for T {
  fn upcast(self: Arc<Self>) -> Arc<T> {
    self
  }

  fn upcast_rc(self: Rc<Self>) -> Rc<T> {
    self
  }
}

/// One link of a declared ancestor chain: a type and a way to reach its parent.
#[derive(Clone, Copy)]
pub struct Lineage {
  id: TypeIdentifier,
  parent: fn() -> Option<Lineage>,
}

impl Lineage {
  pub fn of<T: ?Sized + Class>() -> Self {
    Self {
      id: TypeIdentifier::of::<T>(),
      parent: <T as Class>::superclass,
    }
  }

  pub fn id(&self) -> TypeIdentifier {
    self.id
  }

  pub fn parent(&self) -> Option<Lineage> {
    (self.parent)()
  }

  /// Iterates over the declared ancestors, nearest first. `self` is not included.
  ///
  /// Stops at the end of the chain, or as soon as a type would be visited twice.
  pub fn ancestors(&self) -> Ancestors {
    Ancestors {
      next: self.parent(),
      seen: vec![self.id],
    }
  }

  /// Shorthand for [`is_inherited_from`] with `B` as the base.
  pub fn descends_from<B: ?Sized + 'static>(&self) -> bool {
    is_inherited_from(TypeIdentifier::of::<B>(), *self)
  }
}

impl fmt::Debug for Lineage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Lineage").field("id", &self.id).finish()
  }
}

/// Iterator returned by [`Lineage::ancestors`].
pub struct Ancestors {
  next: Option<Lineage>,
  seen: Vec<TypeIdentifier>,
}

impl Iterator for Ancestors {
  type Item = Lineage;

  fn next(&mut self) -> Option<Lineage> {
    let current = self.next.take()?;
    if self.seen.contains(&current.id) {
      return None;
    }
    self.seen.push(current.id);
    self.next = current.parent();
    Some(current)
  }
}

/// Returns `true` if `base` appears anywhere in the declared ancestor chain of
/// `candidate`.
///
/// A type is not its own ancestor. A chain that ends without reaching `base`,
/// including one severed by a `superclass()` returning `None`, yields `false`.
pub fn is_inherited_from(base: TypeIdentifier, candidate: Lineage) -> bool {
  candidate.ancestors().any(|ancestor| ancestor.id == base)
}
