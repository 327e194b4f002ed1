//! Registry configuration.

/// Settings a [`Registry`](crate::Registry) is created with.
///
/// With the `serde` feature the struct can be read from an application's own
/// configuration file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
  /// Name attached to the registry's log events.
  pub label: Option<String>,
  /// Reject registrations whose implementation does not declare the base as an
  /// ancestor. Enabled by default.
  pub validate_inheritance: bool,
}

impl Default for RegistryConfig {
  fn default() -> Self {
    Self {
      label: None,
      validate_inheritance: true,
    }
  }
}

impl RegistryConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn validate_inheritance(mut self, enabled: bool) -> Self {
    self.validate_inheritance = enabled;
    self
  }

  pub(crate) fn label_or_default(&self) -> &str {
    self.label.as_deref().unwrap_or("registry")
  }
}
