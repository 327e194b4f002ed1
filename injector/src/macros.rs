//! Public macros for declaring lineage and for ergonomic resolution.

/// Implements [`Class`](crate::Class) for a type, optionally declaring its
/// direct supertype.
///
/// The supertype must itself implement `Class`; the registry follows the
/// chain through it. For a concrete type the macro also implements
/// [`Upcast`](crate::Upcast) to the supertype, plus to any further ancestors
/// listed after it, so the type can be registered under each of them. Trait
/// objects only declare lineage, and are named by a single identifier, so
/// bring the trait into scope first.
///
/// ```
/// use fibre_injector::{class, Lineage, Registry};
///
/// trait Shape: Send + Sync {}
/// trait Polygon: Shape {}
/// struct Square;
/// impl Shape for Square {}
/// impl Polygon for Square {}
///
/// class!(dyn Shape);
/// class!(dyn Polygon: dyn Shape);
/// class!(Square: dyn Polygon, dyn Shape);
///
/// assert!(Lineage::of::<Square>().descends_from::<dyn Shape>());
///
/// let registry = Registry::new();
/// registry.add_singleton::<dyn Shape, Square>(|| Square).unwrap();
/// registry.add_singleton::<dyn Polygon, Square>(|| Square).unwrap();
/// ```
#[macro_export]
macro_rules! class {
  (@upcast $type:ty => $target:ty) => {
    impl $crate::Upcast<$target> for $type {
      fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$target> {
        self
      }

      fn upcast_rc(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<$target> {
        self
      }
    }
  };

  (dyn $trait_name:ident) => {
    impl $crate::Class for dyn $trait_name {}
  };

  (dyn $trait_name:ident : $parent:ty) => {
    impl $crate::Class for dyn $trait_name {
      fn superclass() -> ::core::option::Option<$crate::Lineage> {
        ::core::option::Option::Some($crate::Lineage::of::<$parent>())
      }
    }
  };

  ($type:ty) => {
    impl $crate::Class for $type {}
  };

  ($type:ty : $parent:ty $(, $ancestor:ty)* $(,)?) => {
    impl $crate::Class for $type {
      fn superclass() -> ::core::option::Option<$crate::Lineage> {
        ::core::option::Option::Some($crate::Lineage::of::<$parent>())
      }
    }

    $crate::class!(@upcast $type => $parent);
    $( $crate::class!(@upcast $type => $ancestor); )*
  };
}

/// Resolves a service from the global registry.
///
/// # Panics
///
/// Panics if the service cannot be resolved. For a non-panicking version,
/// use `global().resolve::<T>()` directly.
///
/// ```
/// use fibre_injector::{class, global, resolve};
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
/// class!(dyn Greeter);
/// class!(EnglishGreeter: dyn Greeter);
///
/// global()
///   .add_singleton::<dyn Greeter, EnglishGreeter>(|| EnglishGreeter)
///   .unwrap();
///
/// let greeter = resolve!(dyn Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty) => {
    $crate::resolve_from!($crate::global(), $type)
  };
}

/// Resolves a service from an explicit registry, panicking on failure.
///
/// A type is not its own ancestor, so registering a concrete type against
/// itself needs inheritance validation turned off:
///
/// ```
/// use fibre_injector::{class, resolve_from, Registry, RegistryConfig};
///
/// struct Config { port: u16 }
/// class!(Config);
///
/// let registry = Registry::with_config(RegistryConfig::new().validate_inheritance(false));
/// registry.add_singleton::<Config, Config>(|| Config { port: 8080 }).unwrap();
///
/// let config = resolve_from!(&registry, Config);
/// assert_eq!(config.port, 8080);
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($registry:expr, $type:ty) => {
    match $registry.resolve::<$type>() {
      ::core::result::Result::Ok(service) => service,
      ::core::result::Result::Err(err) => panic!(
        "Failed to resolve required service: {}: {}",
        ::std::any::type_name::<$type>(),
        err
      ),
    }
  };
}
