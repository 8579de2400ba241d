// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment trait definition.
//!
//! This module defines the `Environment` trait, the capability the expansion engine
//! uses to read variable bindings and, for `${NAME:=default}`, to write them back.
//! Injecting it instead of touching the process environment directly keeps the
//! assignment side effect explicit and lets expansion run against an isolated store.

use crate::domain::{ExpandError, Result};

/// A readable and writable store of named string variables.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::ports::Environment;
/// use cfgexpand::domain::Result;
/// use std::collections::BTreeMap;
///
/// struct SortedEnv(BTreeMap<String, String>);
///
/// impl Environment for SortedEnv {
///     fn get(&self, name: &str) -> Option<String> {
///         self.0.get(name).cloned()
///     }
///
///     fn set(&mut self, name: &str, value: &str) -> Result<()> {
///         self.0.insert(name.to_string(), value.to_string());
///         Ok(())
///     }
/// }
///
/// let mut env = SortedEnv(BTreeMap::new());
/// env.set("HOST", "localhost").unwrap();
/// assert_eq!(env.get("HOST"), Some("localhost".to_string()));
/// ```
pub trait Environment {
    /// Returns the value bound to `name`, or `None` if it is unset.
    ///
    /// A variable bound to the empty string returns `Some("")`.
    fn get(&self, name: &str) -> Option<String>;

    /// Binds `name` to `value`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The binding was written
    /// * `Err(ExpandError::EnvironmentWrite)` - The name or value cannot be stored
    fn set(&mut self, name: &str, value: &str) -> Result<()>;
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).set(name, value)
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<()> {
        (**self).set(name, value)
    }
}

/// Checks that a binding could be stored in a process environment.
///
/// Names must be non-empty and contain neither `=` nor NUL; values must not
/// contain NUL.
pub fn validate_binding(name: &str, value: &str) -> Result<()> {
    let problem = if name.is_empty() {
        Some("name is empty")
    } else if name.contains('=') {
        Some("name contains '='")
    } else if name.contains('\0') {
        Some("name contains a NUL character")
    } else if value.contains('\0') {
        Some("value contains a NUL character")
    } else {
        None
    };

    match problem {
        Some(message) => Err(ExpandError::EnvironmentWrite {
            name: name.to_string(),
            message: message.to_string(),
        }),
        None => Ok(()),
    }
}
