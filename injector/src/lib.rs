//! # Fibre Injector
//!
//! A minimal, thread-safe dependency-injection registry for Rust.
//!
//! Callers register an implementation type for an abstract base type (usually a
//! trait object) together with a [`Lifetime`], and later resolve the base type.
//! The registry decides whether to hand out a cached instance or construct a
//! fresh one.
//!
//! ## Core Concepts
//!
//! - **Registry**: the store of registrations, keyed by the base type's identity.
//! - **Lifetime**: `Transient` constructs on every resolve, `Singleton` constructs
//!   once and caches.
//! - **Class / Lineage**: each registrable type declares its supertype, and the
//!   registry rejects an implementation that does not declare the base among
//!   its ancestors. Factories build the implementation type itself; the
//!   registry upcasts it to the base through [`Upcast`].
//! - **Global Registry**: a process-wide default, created on first access via
//!   [`global()`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_injector::{class, Error, Registry};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter;
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "Hello, World!".to_string()
//!     }
//! }
//!
//! class!(dyn Greeter);
//! class!(EnglishGreeter: dyn Greeter);
//!
//! fn main() -> Result<(), Error> {
//!     let registry = Registry::new();
//!     registry.add_singleton::<dyn Greeter, EnglishGreeter>(|| EnglishGreeter)?;
//!
//!     let greeter = registry.resolve::<dyn Greeter>()?;
//!     assert_eq!(greeter.greet(), "Hello, World!");
//!
//!     let missing = registry.resolve::<EnglishGreeter>();
//!     assert!(matches!(missing, Err(Error::UnresolvableDependency(_))));
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod global;
mod identity;
mod lifetime;
#[cfg(feature = "local")]
mod local_registry;
mod macros;
mod registration;
mod registry;

pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use global::{global, is_global_initialized};
pub use identity::{is_inherited_from, Ancestors, Class, Lineage, TypeIdentifier, Upcast};
pub use lifetime::{Lifetime, ParseLifetimeError};
#[cfg(feature = "local")]
pub use local_registry::{LocalRegistration, LocalRegistry};
pub use registration::Registration;
pub use registry::Registry;
