use thiserror::Error;

use crate::identity::TypeIdentifier;

/// The error type for registry operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
  /// `add` was given an implementation whose declared lineage does not contain the base.
  #[error("Cannot register {implementation} for {base}: it does not inherit from the base type")]
  CannotRegisterDependency {
    base: TypeIdentifier,
    implementation: TypeIdentifier,
  },

  /// No usable registration exists for the requested base type.
  #[error("Unresolvable dependency: no registration for {0}")]
  UnresolvableDependency(TypeIdentifier),

  /// A stored registration carries a lifetime code the registry does not know.
  /// Never produced through the public API.
  #[error("Unexpected state while resolving {key}: lifetime code was {code}")]
  UnexpectedState { key: TypeIdentifier, code: u8 },
}

impl Error {
  /// `true` for internal consistency failures the caller cannot fix.
  pub fn is_internal(&self) -> bool {
    matches!(self, Error::UnexpectedState { .. })
  }
}

/// A specialized `Result` type for `fibre_injector` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
