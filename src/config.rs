//! Generator configuration.
//!
//! ```toml
//! dialect = "mysql"
//! bind_parameters = true
//! omit_null = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::transpiler::Dialect;

/// File name looked up in the working directory by [`GeneratorConfig::discover`].
pub const LOCAL_CONFIG: &str = "querygen.toml";

/// Instance-wide settings, fixed when the generator is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub dialect: Dialect,
    /// Emit placeholders and collect bind values instead of inline literals
    pub bind_parameters: bool,
    /// Leave null values out of INSERT and UPDATE
    pub omit_null: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            bind_parameters: false,
            omit_null: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    pub fn from_toml_str(content: &str) -> QueryResult<Self> {
        toml::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded generator config from {}", path.display());
        Ok(config)
    }

    /// Load `./querygen.toml`, else `<config dir>/querygen/config.toml`,
    /// else defaults.
    pub fn discover() -> QueryResult<Self> {
        for path in Self::candidates() {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("querygen").join("config.toml"));
        }
        paths
    }
}

/// Per-call overrides. `None` falls back to the generator config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default)]
    pub bind_parameters: Option<bool>,
    #[serde(default)]
    pub omit_null: Option<bool>,
}

impl QueryOptions {
    pub fn bind() -> Self {
        Self {
            bind_parameters: Some(true),
            ..Default::default()
        }
    }

    pub fn inline() -> Self {
        Self {
            bind_parameters: Some(false),
            ..Default::default()
        }
    }

    pub fn omit_null(mut self, omit: bool) -> Self {
        self.omit_null = Some(omit);
        self
    }
}
