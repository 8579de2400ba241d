// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document parser trait definition.
//!
//! This module defines the `DocumentParser` trait, which provides an interface for
//! turning raw configuration text (YAML, JSON, ...) into a document tree.

use crate::domain::{Node, Result};

/// A trait for parsing configuration documents into a [`Node`] tree.
///
/// Implementations must record for every scalar whether it was written plain or
/// quoted, and the type a plain scalar resolved to. Comments are not part of the
/// tree.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::ports::DocumentParser;
/// use cfgexpand::domain::{Node, Result};
///
/// struct LineParser;
///
/// impl DocumentParser for LineParser {
///     fn parse(&self, content: &str) -> Result<Node> {
///         Ok(Node::Sequence(content.lines().map(Node::plain).collect()))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let node = LineParser.parse("a\nb").unwrap();
/// assert_eq!(node, Node::Sequence(vec![Node::plain("a"), Node::plain("b")]));
/// ```
pub trait DocumentParser {
    /// Parses raw document text into a tree.
    ///
    /// # Returns
    ///
    /// * `Ok(Node)` - The parsed document
    /// * `Err(ExpandError::ParseError)` - The text is not a well-formed document
    fn parse(&self, content: &str) -> Result<Node>;

    /// Returns the file extensions supported by this parser.
    ///
    /// Extensions are given without the leading dot.
    fn supported_extensions(&self) -> &[&str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpandError;

    struct KeyValueParser;

    impl DocumentParser for KeyValueParser {
        fn parse(&self, content: &str) -> Result<Node> {
            let mut entries = Vec::new();
            for line in content.lines() {
                let (key, value) =
                    line.split_once('=')
                        .ok_or_else(|| ExpandError::ParseError {
                            message: format!("missing '=' in line: {line}"),
                            source: None,
                        })?;
                entries.push((Node::plain(key), Node::plain(value)));
            }
            Ok(Node::Mapping(entries))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["env", "properties"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let node = KeyValueParser.parse("host=localhost\nport=5432").unwrap();
        assert_eq!(node.get("host"), Some(&Node::plain("localhost")));
        assert_eq!(node.get("port"), Some(&Node::plain("5432")));
    }

    #[test]
    fn test_parser_error() {
        let result = KeyValueParser.parse("no separator");
        assert!(matches!(result, Err(ExpandError::ParseError { .. })));
    }

    #[test]
    fn test_parser_supported_extensions() {
        let parser = KeyValueParser;
        assert_eq!(parser.supported_extensions(), &["env", "properties"]);
    }
}
