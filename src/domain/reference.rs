// SPDX-License-Identifier: MIT OR Apache-2.0

//! Variable references and their operator semantics.
//!
//! A reference is the text between `${` and `}`. It is split on the first `:` into a
//! name and an operand; the first character of the operand selects the operator:
//!
//! | Form             | Unset or empty                     | Set and non-empty |
//! |------------------|------------------------------------|-------------------|
//! | `NAME`           | bound value (maybe empty), else "" | bound value       |
//! | `NAME:`          | bound value (maybe empty), else "" | bound value       |
//! | `NAME:default`   | `default`                          | bound value       |
//! | `NAME:-default`  | `default`                          | bound value       |
//! | `NAME:=default`  | `default`, and binds `NAME`        | bound value       |
//! | `NAME:?message`  | error carrying `message`           | bound value       |

use crate::domain::{ExpandError, Result};
use crate::ports::Environment;

/// Message used by `${NAME:?}` when no message is given.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "is not set or empty";

/// The operator of a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `${NAME}` or `${NAME:}`
    Bare,
    /// `${NAME:-default}` or `${NAME:default}`
    Default,
    /// `${NAME:=default}`
    Assign,
    /// `${NAME:?message}`
    Required,
}

/// A parsed `${...}` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// The variable name
    pub name: &'a str,
    /// The operator applied when the variable is unset or empty
    pub operator: Operator,
    /// The default value or error message, without the operator character
    pub operand: &'a str,
}

impl<'a> Reference<'a> {
    /// Parses the content of a reference, i.e. the text between `${` and `}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgexpand::domain::{Operator, Reference};
    ///
    /// let reference = Reference::parse("DSN:user:pass@localhost:3306");
    /// assert_eq!(reference.name, "DSN");
    /// assert_eq!(reference.operator, Operator::Default);
    /// assert_eq!(reference.operand, "user:pass@localhost:3306");
    /// ```
    pub fn parse(content: &'a str) -> Self {
        let Some((name, rest)) = content.split_once(':') else {
            return Reference {
                name: content,
                operator: Operator::Bare,
                operand: "",
            };
        };

        let (operator, operand) = match rest.as_bytes().first() {
            None => (Operator::Bare, ""),
            Some(b'-') => (Operator::Default, &rest[1..]),
            Some(b'=') => (Operator::Assign, &rest[1..]),
            Some(b'?') => (Operator::Required, &rest[1..]),
            Some(_) => (Operator::Default, rest),
        };

        Reference {
            name,
            operator,
            operand,
        }
    }

    /// Resolves the reference against an environment.
    ///
    /// `${NAME:=default}` writes `default` into the environment when the variable
    /// is unset or empty; every other operator only reads.
    pub fn resolve<E>(&self, env: &mut E) -> Result<String>
    where
        E: Environment + ?Sized,
    {
        let bound = env.get(self.name);

        if self.operator == Operator::Bare {
            return Ok(bound.unwrap_or_default());
        }

        if let Some(value) = bound.filter(|v| !v.is_empty()) {
            return Ok(value);
        }

        match self.operator {
            Operator::Bare | Operator::Default => Ok(self.operand.to_string()),
            Operator::Assign => {
                env.set(self.name, self.operand)?;
                tracing::debug!("Assigned default to environment variable {}", self.name);
                Ok(self.operand.to_string())
            }
            Operator::Required => {
                let message = if self.operand.is_empty() {
                    DEFAULT_REQUIRED_MESSAGE
                } else {
                    self.operand
                };
                Err(ExpandError::RequiredVariable {
                    name: self.name.to_string(),
                    message: message.to_string(),
                })
            }
        }
    }
}
