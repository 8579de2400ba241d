// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bash-style environment variable expansion for YAML and JSON configuration.
//!
//! This crate parses a configuration document, expands the environment variable
//! references found in its scalar values, and decodes the result into any
//! `serde::Deserialize` type.
//!
//! # Syntax
//!
//! - `${VAR}`: value of `VAR`, or an empty string if unset
//! - `${VAR:-default}`: value of `VAR`, or `default` if `VAR` is unset or empty
//! - `${VAR:default}`: same as above
//! - `${VAR:=default}`: like `:-`, and also sets `VAR` to `default`
//! - `${VAR:?message}`: value of `VAR`, or an error carrying `message`
//! - `$${VAR}`: the literal text `${VAR}`
//!
//! References nest (`${A:-${B:-final}}`) and are resolved inside-out, with a
//! bounded number of passes so self-referential defaults cannot loop forever.
//!
//! Only scalar values are expanded. Mapping keys and comments are never touched.
//! An unquoted scalar has its type inferred again after expansion, so
//! `port: ${PORT:8080}` decodes into an integer field while
//! `port: "${PORT:8080}"` stays a string.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: document tree, reference grammar and operator semantics, errors
//! - **Ports**: trait definitions for collaborators (`Environment`, `DocumentParser`)
//! - **Adapters**: process and in-memory environments, the YAML parser
//! - **Service**: the resolver, the document walker and the `Expander` that wires them
//!
//! # Feature Flags
//!
//! - `cli`: build the `cfgexpand` command-line tool (default)
//!
//! # Quick Start
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     host: String,
//!     port: u16,
//! }
//!
//! # fn main() -> cfgexpand::domain::Result<()> {
//! let cfg: Config = cfgexpand::from_str("host: ${CFGEXPAND_DOC_HOST:localhost}\nport: ${CFGEXPAND_DOC_PORT:8080}")?;
//! assert_eq!(cfg.host, "localhost");
//! assert_eq!(cfg.port, 8080);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

use domain::Result;
use serde::de::DeserializeOwned;
use service::Expander;
use std::io::Read;
use std::path::Path;

/// Expands `text` against the process environment and decodes it into `T`.
///
/// # Errors
///
/// Fails if `text` is not a well-formed document, if a `${VAR:?}` reference is
/// unset or empty, if a `${VAR:=default}` write is rejected, or if the expanded
/// document does not fit `T`.
pub fn from_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    Expander::new().decode_str(text)
}

/// Like [`from_str`], for UTF-8 bytes.
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Expander::new().decode_slice(bytes)
}

/// Like [`from_str`], reading the document from `reader`.
pub fn from_reader<R: Read, T: DeserializeOwned>(reader: R) -> Result<T> {
    Expander::new().decode_reader(reader)
}

/// Like [`from_str`], reading the document from a file.
pub fn from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    Expander::new().decode_file(path)
}

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{MapEnvironment, ProcessEnvironment, YamlDocumentParser};
    pub use crate::domain::{ExpandError, Node, Result, ScalarStyle, ScalarTag};
    pub use crate::ports::{DocumentParser, Environment};
    pub use crate::service::{Expander, DEFAULT_BUDGET};
}
