//! Display-label remapping for diagram nodes.
//!
//! A [`LabelMap`] is built once at startup and passed explicitly to the
//! flow builder. Lookups are a plain name-to-name map with no exclusion
//! list, so a map entry for "Others" is honored like any other.

use crate::utils::config::DEFAULT_LABEL_OVERRIDES;
use crate::utils::error::ConfigError;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Immutable name -> display name mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    entries: HashMap<String, String>,
}

impl LabelMap {
    /// A map that resolves every name to itself
    pub fn identity() -> Self {
        Self::default()
    }

    /// The built-in overrides
    pub fn with_defaults() -> Self {
        Self::identity().overlay(
            DEFAULT_LABEL_OVERRIDES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    /// Return a new map with `entries` layered on top
    ///
    /// **Public** - later entries win for matching keys
    pub fn overlay<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(entries);
        self
    }

    /// Parse a flat JSON object of strings and overlay it on the defaults
    ///
    /// # Errors
    /// * `ConfigError::LabelMap` - not a JSON object of string values
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let external: HashMap<String, String> = serde_json::from_str(json)?;
        debug!("Parsed {} label overrides", external.len());
        Ok(Self::with_defaults().overlay(external))
    }

    /// Load a JSON override file and overlay it on the defaults
    ///
    /// **Public** - the generate command falls back to defaults on error
    ///
    /// # Errors
    /// * `ConfigError::Io` - file cannot be read
    /// * `ConfigError::LabelMap` - invalid JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let map = Self::from_json_str(&content)?;
        info!("Loaded overwrite map from '{}'", path.display());
        Ok(map)
    }

    /// Display label for `name`
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
