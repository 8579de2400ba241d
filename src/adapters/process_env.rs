// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process environment adapter.
//!
//! This module provides an `Environment` implementation backed by the environment
//! of the running process.

use crate::domain::{ExpandError, Result};
use crate::ports::{validate_binding, Environment};
use std::env;

/// Maximum length for environment variable names (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Environment adapter for the process environment.
///
/// Reads go to `std::env::var_os`; `${NAME:=default}` writes go to
/// `std::env::set_var` and are visible to the whole process afterwards, including
/// other expansions running concurrently.
///
/// An optional prefix is prepended to every name before it is looked up, so that
/// `${HOST}` can be served from `MYAPP_HOST`.
///
/// Values that are not valid UTF-8 or exceed the size limits are treated as unset.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::adapters::ProcessEnvironment;
/// use cfgexpand::ports::Environment;
///
/// let env = ProcessEnvironment::new();
/// assert_eq!(env.get("CFGEXPAND_DOC_SURELY_UNSET"), None);
///
/// let prefixed = ProcessEnvironment::with_prefix("MYAPP_");
/// assert_eq!(prefixed.prefix(), Some("MYAPP_"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProcessEnvironment {
    /// Optional prefix added to every variable name
    prefix: Option<String>,
}

impl ProcessEnvironment {
    /// Creates an adapter over the process environment without a prefix.
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Creates an adapter that prepends `prefix` to every variable name.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Returns the configured prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn full_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}

impl Environment for ProcessEnvironment {
    fn get(&self, name: &str) -> Option<String> {
        let full_name = self.full_name(name);
        if full_name.is_empty() || full_name.len() > MAX_ENV_KEY_LEN {
            return None;
        }
        // never valid names on any platform
        if full_name.contains(&['=', '\0'][..]) {
            return None;
        }

        let value = env::var_os(&full_name)?;
        if value.len() > MAX_ENV_VALUE_LEN {
            tracing::debug!(
                "Ignoring oversized environment variable {}: value_len={} (max={})",
                full_name,
                value.len(),
                MAX_ENV_VALUE_LEN
            );
            return None;
        }

        match value.into_string() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::debug!("Ignoring non UTF-8 environment variable {}", full_name);
                None
            }
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let full_name = self.full_name(name);
        validate_binding(&full_name, value)?;

        if full_name.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
            return Err(ExpandError::EnvironmentWrite {
                name: full_name,
                message: format!(
                    "exceeds size limits (max name={}, max value={})",
                    MAX_ENV_KEY_LEN, MAX_ENV_VALUE_LEN
                ),
            });
        }

        env::set_var(&full_name, value);
        tracing::debug!("Set process environment variable {}", full_name);
        Ok(())
    }
}
