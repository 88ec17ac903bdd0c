//! Engine configuration.
//!
//! Configuration can be built in code with the `with_*` methods or loaded
//! from TOML:
//!
//! ```
//! use nested_list::ListConfig;
//!
//! let config = ListConfig::from_toml_str(
//!     r#"
//!     max_depth = 32
//!     position_index = false
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.max_depth, 32);
//! assert!(!config.position_index);
//! ```

use std::path::Path;

use nested_list_core::logging::targets;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default limit on group nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for a [`NestedList`](crate::NestedList).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Deepest group depth accepted while flattening; roots are depth 0.
    pub max_depth: usize,
    /// Maintain id-to-position maps on every rebuild for O(1) lookups.
    pub position_index: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            position_index: true,
        }
    }
}

impl ListConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum group depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enables or disables the position index.
    pub fn with_position_index(mut self, enabled: bool) -> Self {
        self.position_index = enabled;
        self
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "loaded list configuration");
        Ok(config)
    }
}
