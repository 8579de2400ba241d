// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory environment adapter.
//!
//! This module provides an `Environment` backed by a `HashMap`, for callers that
//! want expansion isolated from the process environment (tests, or several
//! expansions that must not see each other's `${NAME:=default}` writes).

use crate::domain::Result;
use crate::ports::{validate_binding, Environment};
use std::collections::HashMap;

/// Environment adapter over an owned map of variables.
///
/// Writes follow the same naming rules as the process environment, so a document
/// that fails against [`ProcessEnvironment`](crate::adapters::ProcessEnvironment)
/// also fails here.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::adapters::MapEnvironment;
/// use cfgexpand::ports::Environment;
///
/// let mut env = MapEnvironment::new().with_value("HOST", "db.internal");
/// assert_eq!(env.get("HOST"), Some("db.internal".to_string()));
///
/// env.set("PORT", "5432").unwrap();
/// assert_eq!(env.into_inner().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
}

impl MapEnvironment {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Creates an environment holding the given variables.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Creates a snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let values = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect::<HashMap<_, _>>();
        tracing::debug!("Snapshot of {} process environment variables", values.len());
        Self { values }
    }

    /// Adds a variable, builder style.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Removes a variable, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no variables are bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the environment, returning its variables.
    pub fn into_inner(self) -> HashMap<String, String> {
        self.values
    }
}

impl Environment for MapEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        validate_binding(name, value)?;
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnvironment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
