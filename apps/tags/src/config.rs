//! Configuration for the tags feature
//!
//! Settings come from an optional TOML file plus environment overrides:
//!
//! - `TAGS_CONFIG`: path to a TOML file with any of the fields below
//! - `TAGS_NEW_TAG_NAME`: overrides `new_tag_name`
//!
//! # Example
//!
//! ```
//! use tags::config::TagsConfig;
//!
//! let config: TagsConfig = toml::from_str(r#"
//!     new_tag_name = "Untitled"
//!
//!     [[seed]]
//!     name = "All"
//!     ubiquitous = true
//! "#).map_err(tags::config::ConfigError::from)?;
//!
//! config.validate()?;
//! assert_eq!(config.new_tag_name, "Untitled");
//! assert_eq!(config.seed.len(), 1);
//! # Ok::<(), tags::config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the TOML file path
pub const CONFIG_PATH_VAR: &str = "TAGS_CONFIG";

/// Environment variable overriding the new tag name
pub const NEW_TAG_NAME_VAR: &str = "TAGS_NEW_TAG_NAME";

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`TagsConfig`]
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// One tag of the initial repository contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTag {
    /// Display name
    pub name: String,
    /// Built-in tag
    #[serde(default)]
    pub ubiquitous: bool,
}

impl SeedTag {
    /// A built-in seed tag
    #[must_use]
    pub fn ubiquitous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ubiquitous: true,
        }
    }

    /// A user seed tag
    #[must_use]
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ubiquitous: false,
        }
    }
}

/// The standard seed: four built-in tags and one user tag
#[must_use]
pub fn default_seed() -> Vec<SeedTag> {
    vec![
        SeedTag::ubiquitous("All"),
        SeedTag::ubiquitous("Built-In"),
        SeedTag::ubiquitous("Added"),
        SeedTag::ubiquitous("External"),
        SeedTag::user("User Tag"),
    ]
}

fn default_new_tag_name() -> String {
    "New Tag".to_string()
}

fn default_log_filter() -> String {
    "tags=debug,row_bindings_runtime=debug".to_string()
}

/// Tags feature configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Name given to tags created by the add buttons
    pub new_tag_name: String,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Initial repository contents, in display order
    pub seed: Vec<SeedTag>,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            new_tag_name: default_new_tag_name(),
            log_filter: default_log_filter(),
            seed: default_seed(),
        }
    }
}

impl TagsConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if the file named by `TAGS_CONFIG` cannot be read or
    /// parsed, or if the result fails [`validate`](Self::validate).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration using `lookup` for environment variables
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(name) = lookup(NEW_TAG_NAME_VAR) {
            config.new_tag_name = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if `new_tag_name` is blank, the seed has no built-in
    /// tag, or two built-in seed tags share a name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.new_tag_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "new_tag_name cannot be empty".to_string(),
            ));
        }

        if !self.seed.iter().any(|tag| tag.ubiquitous) {
            return Err(ConfigError::Validation(
                "seed must contain at least one ubiquitous tag".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for tag in self.seed.iter().filter(|tag| tag.ubiquitous) {
            if !seen.insert(tag.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate ubiquitous tag name: {}",
                    tag.name
                )));
            }
        }

        Ok(())
    }
}
