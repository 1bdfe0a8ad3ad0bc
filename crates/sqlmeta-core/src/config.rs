// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Configuration sources.
//!
//! Metadata resolution reads a handful of string settings through the
//! [`ConfigSource`] trait. Values are read once, when an entity is resolved.
//!
//! # Keys
//!
//! | Key | Default | Effect |
//! |-----|---------|--------|
//! | `tenant.column.name` | `tenant_id` | Column of the tenant-flagged property |
//! | `tenant.ignore-tables` | empty | Comma-separated tables exempt from tenant filtering |
//!
//! # Example
//!
//! ```rust
//! use sqlmeta_core::config::{ConfigSource, EnvConfig, LayeredConfig, MapConfig};
//!
//! let config = LayeredConfig::new()
//!     .with(MapConfig::new().with("tenant.column.name", "org_id"))
//!     .with(EnvConfig::default());
//! assert_eq!(config.get("tenant.column.name").as_deref(), Some("org_id"));
//! ```

use std::{collections::HashMap, sync::Arc};

/// Key naming the tenant column.
pub const TENANT_COLUMN_KEY: &str = "tenant.column.name";

/// Value of [`TENANT_COLUMN_KEY`] when nothing is configured.
pub const DEFAULT_TENANT_COLUMN: &str = "tenant_id";

/// Key listing tables exempt from tenant filtering.
pub const TENANT_IGNORE_TABLES_KEY: &str = "tenant.ignore-tables";

/// Key/value configuration lookup.
pub trait ConfigSource: Send + Sync {
    /// Look up a key.
    fn get(&self, key: &str) -> Option<String>;

    /// Look up a key, falling back to `default`.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_owned())
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<C: ConfigSource + ?Sized> ConfigSource for Arc<C> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Configured tenant column, when it differs from the default.
///
/// Blank values count as absent.
pub fn tenant_column_override(config: &dyn ConfigSource) -> Option<String> {
    config
        .get(TENANT_COLUMN_KEY)
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty() && c != DEFAULT_TENANT_COLUMN)
}

/// In-memory configuration.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>
}

impl MapConfig {
    /// Empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Add or replace a key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ConfigSource for MapConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Process environment configuration.
///
/// `tenant.column.name` is read from `SQLMETA_TENANT_COLUMN_NAME`: the key is
/// uppercased, `.` and `-` become `_`, and the prefix is prepended.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    prefix: String
}

impl EnvConfig {
    /// Environment configuration with a custom variable prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into()
        }
    }

    /// Environment variable name for a key.
    pub fn variable(&self, key: &str) -> String {
        let key: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase()
            })
            .collect();
        if self.prefix.is_empty() {
            key
        } else {
            format!("{}_{key}", self.prefix)
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::with_prefix("SQLMETA")
    }
}

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.variable(key)).ok()
    }
}

/// Ordered stack of sources; the first source that knows a key wins.
#[derive(Clone, Default)]
pub struct LayeredConfig {
    layers: Vec<Arc<dyn ConfigSource>>
}

impl LayeredConfig {
    /// Empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority source.
    #[must_use]
    pub fn with(mut self, source: impl ConfigSource + 'static) -> Self {
        self.layers.push(Arc::new(source));
        self
    }
}

impl std::fmt::Debug for LayeredConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredConfig")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl ConfigSource for LayeredConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}
