// SPDX-License-Identifier: MIT OR Apache-2.0
//! testwire-registry
//!
//! Maps reporter names to factories so a runner can instantiate a
//! reporter from a `--reporter <name>` style key. The registry is a
//! plain value populated at start-up; there is no global mutable
//! state.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;
use std::io::Write;

use testwire_events::Reporter;
use thiserror::Error;

/// Output handle a runner lends to a freshly created reporter.
pub type ReporterOutput = Box<dyn Write + Send>;

/// Boxed reporter as handed back to the runner.
pub type BoxedReporter = Box<dyn Reporter + Send>;

/// Errors arising from reporter lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No factory is registered under the requested name.
    #[error("no reporter registered under `{0}`")]
    UnknownReporter(String),
}

struct Entry {
    description: String,
    factory: Box<dyn Fn(ReporterOutput) -> BoxedReporter + Send + Sync>,
}

/// A typed registry of named reporter factories.
#[derive(Default)]
pub struct ReporterRegistry {
    entries: HashMap<String, Entry>,
}

impl ReporterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in reporters.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            testwire_teamcity::REPORTER_NAME,
            testwire_teamcity::DESCRIPTION,
            |out| Box::new(testwire_teamcity::TeamCityReporter::new(out)),
        );
        registry
    }

    /// Register a factory under the given name, replacing any previous
    /// entry.
    pub fn register<F>(&mut self, name: impl Into<String>, description: impl Into<String>, factory: F)
    where
        F: Fn(ReporterOutput) -> BoxedReporter + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(target: "testwire.registry", name = %name, "reporter registered");
        self.entries.insert(
            name,
            Entry {
                description: description.into(),
                factory: Box::new(factory),
            },
        );
    }

    /// Instantiate the named reporter over the given output stream.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownReporter`] when no factory is
    /// registered under `name`.
    pub fn create(&self, name: &str, out: ReporterOutput) -> Result<BoxedReporter, RegistryError> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownReporter(name.to_string()))?;
        Ok((entry.factory)(out))
    }

    /// Check whether a reporter with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Human-readable description of the named reporter, if registered.
    #[must_use]
    pub fn describe(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.description.as_str())
    }

    /// Return a sorted list of registered reporter names.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
