//! Instance lifetimes.

use std::fmt;
use std::str::FromStr;

/// Controls whether a resolved instance is reused.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Lifetime {
  /// A new instance on every resolve.
  Transient = 0,
  /// Constructed on first resolve, then cached for the life of the registration.
  Singleton = 1,
}

impl Lifetime {
  /// The code a registration stores for this lifetime.
  #[inline]
  pub const fn code(self) -> u8 {
    self as u8
  }

  /// Decodes a stored code. Returns `None` for anything but the two known codes.
  #[inline]
  pub const fn from_code(code: u8) -> Option<Self> {
    match code {
      0 => Some(Lifetime::Transient),
      1 => Some(Lifetime::Singleton),
      _ => None,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Lifetime::Transient => "transient",
      Lifetime::Singleton => "singleton",
    }
  }
}

impl fmt::Display for Lifetime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error returned when parsing a [`Lifetime`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lifetime '{0}', expected 'transient' or 'singleton'")]
pub struct ParseLifetimeError(String);

impl FromStr for Lifetime {
  type Err = ParseLifetimeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "transient" => Ok(Lifetime::Transient),
      "singleton" => Ok(Lifetime::Singleton),
      _ => Err(ParseLifetimeError(s.to_owned())),
    }
  }
}
