// SPDX-License-Identifier: MIT OR Apache-2.0

//! The expansion service.
//!
//! This module provides [`Expander`], which wires a document parser and an
//! environment together: it parses raw text, expands the variable references in
//! every scalar value, and hands the result to `serde_yaml` for decoding.

use crate::adapters::{read_document, ProcessEnvironment, YamlDocumentParser, MAX_DOCUMENT_SIZE};
use crate::domain::{ExpandError, Node, Result};
use crate::ports::{DocumentParser, Environment};
use crate::service::{bridge, resolver, walker};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Expands environment variable references in configuration documents.
///
/// By default the expander reads and writes the process environment, parses YAML
/// (or JSON), and performs up to [`resolver::DEFAULT_BUDGET`] resolution passes
/// per scalar.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::adapters::MapEnvironment;
/// use cfgexpand::service::Expander;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Config {
///     host: String,
///     port: u16,
/// }
///
/// # fn main() -> cfgexpand::domain::Result<()> {
/// let env = MapEnvironment::new().with_value("HOST", "db.internal");
/// let mut expander = Expander::with_environment(env);
///
/// let cfg: Config = expander.decode_str("host: ${HOST:localhost}\nport: ${PORT:5432}")?;
/// assert_eq!(cfg.host, "db.internal");
/// assert_eq!(cfg.port, 5432);
/// # Ok(())
/// # }
/// ```
pub struct Expander<E = ProcessEnvironment> {
    /// Variable store consulted and, for `:=`, written
    env: E,
    /// Parser for raw document text
    parser: Box<dyn DocumentParser>,
    /// Maximum number of resolution passes per scalar
    budget: usize,
    /// Whether references left after the budget are an error
    strict: bool,
}

impl Expander<ProcessEnvironment> {
    /// Creates an expander over the process environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgexpand::service::Expander;
    ///
    /// let expander = Expander::new();
    /// assert_eq!(expander.budget(), 10);
    /// ```
    pub fn new() -> Self {
        Self::with_environment(ProcessEnvironment::new())
    }
}

impl Default for Expander<ProcessEnvironment> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Environment> Expander<E> {
    /// Creates an expander over the given environment.
    pub fn with_environment(env: E) -> Self {
        Self {
            env,
            parser: Box::new(YamlDocumentParser::new()),
            budget: resolver::DEFAULT_BUDGET,
            strict: false,
        }
    }

    /// Sets the maximum number of resolution passes per scalar.
    ///
    /// A budget of 1 resolves only the innermost level of nested references.
    /// Values below 1 are raised to 1.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget.max(1);
        self
    }

    /// Sets whether references still present once the budget is spent are an
    /// error (`ExpandError::UnresolvedReference`) instead of being left as text.
    pub fn strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    /// Replaces the document parser.
    pub fn with_parser(mut self, parser: Box<dyn DocumentParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Returns the resolution budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Returns whether strict mode is enabled.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns the environment.
    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Returns the environment mutably.
    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Consumes the expander, returning its environment.
    pub fn into_environment(self) -> E {
        self.env
    }

    /// Expands the references in a single piece of text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgexpand::adapters::MapEnvironment;
    /// use cfgexpand::service::Expander;
    ///
    /// let mut expander = Expander::with_environment(MapEnvironment::new());
    /// assert_eq!(expander.expand_str("${A:-${B:-final}}").unwrap(), "final");
    /// assert_eq!(expander.expand_str("$${A}").unwrap(), "${A}");
    /// ```
    pub fn expand_str(&mut self, text: &str) -> Result<String> {
        resolver::expand(text, &mut self.env, self.budget, self.strict)
    }

    /// Expands every scalar value of an already parsed document in place.
    ///
    /// On error the document is left partially expanded.
    pub fn expand_document(&mut self, node: &mut Node) -> Result<()> {
        let (budget, strict) = (self.budget, self.strict);
        let env = &mut self.env;
        walker::walk_scalars(node, &mut |text: &str| {
            resolver::expand(text, &mut *env, budget, strict)
        })
    }

    /// Parses `text` and expands it, returning the expanded tree.
    pub fn expand_to_node(&mut self, text: &str) -> Result<Node> {
        let mut node = self.parser.parse(text)?;
        tracing::debug!("Parsed configuration document ({} bytes)", text.len());
        self.expand_document(&mut node)?;
        Ok(node)
    }

    /// Parses and expands `text`, returning the expanded document as YAML.
    pub fn expand_to_yaml(&mut self, text: &str) -> Result<String> {
        let node = self.expand_to_node(text)?;
        bridge::to_yaml_string(&node)
    }

    /// Parses, expands and decodes `text` into `T`.
    pub fn decode_str<T: DeserializeOwned>(&mut self, text: &str) -> Result<T> {
        let node = self.expand_to_node(text)?;
        bridge::decode(&node)
    }

    /// Like [`decode_str`](Self::decode_str), for UTF-8 bytes.
    pub fn decode_slice<T: DeserializeOwned>(&mut self, bytes: &[u8]) -> Result<T> {
        check_size(bytes.len() as u64)?;
        let text = std::str::from_utf8(bytes).map_err(ExpandError::parse)?;
        self.decode_str(text)
    }

    /// Reads everything from `reader`, then parses, expands and decodes it.
    ///
    /// Input larger than [`MAX_DOCUMENT_SIZE`] is rejected.
    pub fn decode_reader<R: Read, T: DeserializeOwned>(&mut self, reader: R) -> Result<T> {
        let bytes = read_limited(reader)?;
        self.decode_slice(&bytes)
    }

    /// Reads a file, then parses, expands and decodes it.
    pub fn decode_file<T: DeserializeOwned, P: AsRef<Path>>(&mut self, path: P) -> Result<T> {
        let text = read_document(path)?;
        self.decode_str(&text)
    }
}

/// Reads at most [`MAX_DOCUMENT_SIZE`] bytes, failing if there is more.
pub fn read_limited<R: Read>(reader: R) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.take(MAX_DOCUMENT_SIZE + 1).read_to_end(&mut bytes)?;
    check_size(bytes.len() as u64)?;
    Ok(bytes)
}

fn check_size(size: u64) -> Result<()> {
    if size > MAX_DOCUMENT_SIZE {
        return Err(ExpandError::InputTooLarge {
            size,
            max: MAX_DOCUMENT_SIZE,
        });
    }
    Ok(())
}
