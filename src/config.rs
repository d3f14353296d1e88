use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LabError, Result};

/// Settings for the lab binaries, read from TOML. Every key is optional.
///
/// ```toml
/// [database]
/// path = "test.db"
/// table = "users"
///
/// [logging]
/// level = "debug"
///
/// [demo]
/// confirm_delete = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: String,
    pub table: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "test.db".to_string(),
            table: "users".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Answer to the delete prompt. `None` asks on stdin.
    pub confirm_delete: Option<bool>,
}

impl LabConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LabConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            LabError::config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Replace database settings (e.g. from command-line flags) and
    /// re-check them. On error the config is left unchanged.
    pub fn override_database(&mut self, path: Option<String>, table: Option<String>) -> Result<()> {
        let mut merged = self.clone();
        if let Some(path) = path {
            merged.database.path = path;
        }
        if let Some(table) = table {
            merged.database.table = table;
        }
        merged.validate()?;
        *self = merged;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(LabError::config("database.path must not be empty"));
        }
        let table = &self.database.table;
        let valid_table = table
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_table {
            return Err(LabError::config(format!(
                "database.table '{table}' is not a plain SQL identifier"
            )));
        }
        Ok(())
    }
}
