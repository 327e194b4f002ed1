//! The process-wide default registry and its accessor functions.

use crate::registry::Registry;
use once_cell::sync::OnceCell;
use tracing::debug;

// Created on first call to `global()`, never eagerly.
static GLOBAL_REGISTRY: OnceCell<Registry> = OnceCell::new();

/// Provides a reference to the process-wide default registry.
///
/// The registry is created on the first call, in a thread-safe manner, and the
/// same instance is returned for the rest of the process. Prefer passing a
/// [`Registry`] explicitly and keep this accessor for top-level wiring.
///
/// # Examples
///
/// ```
/// use fibre_injector::global;
///
/// assert!(std::ptr::eq(global(), global()));
/// ```
pub fn global() -> &'static Registry {
  GLOBAL_REGISTRY.get_or_init(|| {
    debug!("creating global registry");
    Registry::new()
  })
}

/// Returns `true` once [`global()`] has been called in this process.
pub fn is_global_initialized() -> bool {
  GLOBAL_REGISTRY.get().is_some()
}
