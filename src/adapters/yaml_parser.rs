// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document parser adapter.
//!
//! This module provides a `DocumentParser` for YAML (and therefore JSON) built on the
//! `yaml-rust2` event parser. Unlike `serde_yaml::Value`, the event stream reports how
//! each scalar was written, which decides whether its type may be inferred again
//! after expansion. Comments never produce events, so they never reach the tree.

use crate::domain::{ExpandError, Node, Result};
use crate::ports::DocumentParser;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// Maximum allowed size for configuration documents (10MB)
/// This prevents denial of service attacks via extremely large files
pub const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Handle the parser gives `!!` tags.
const CORE_SCHEMA: &str = "tag:yaml.org,2002:";

/// YAML parser implementation.
///
/// Any node may be the document root. Aliases are replaced by a copy of the
/// anchored node. Quoted and block scalars, `!!str` scalars and scalars with a
/// custom tag are strings; plain scalars and those tagged `!!null`, `!!bool`,
/// `!!int` or `!!float` have their type inferred from their text. Only the first
/// document of a multi-document stream is kept.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::adapters::YamlDocumentParser;
/// use cfgexpand::domain::Node;
/// use cfgexpand::ports::DocumentParser;
///
/// let parser = YamlDocumentParser::new();
/// let doc = parser.parse("port: 8080\nname: \"8080\"").unwrap();
/// assert_eq!(doc.get("port"), Some(&Node::plain("8080")));
/// assert_eq!(doc.get("name"), Some(&Node::quoted("8080")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlDocumentParser;

impl YamlDocumentParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlDocumentParser
    }
}

impl DocumentParser for YamlDocumentParser {
    fn parse(&self, content: &str) -> Result<Node> {
        let mut builder = TreeBuilder::default();
        Parser::new_from_str(content)
            .load(&mut builder, true)
            .map_err(ExpandError::parse)?;

        builder.finish().map_err(ExpandError::parse)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml", "json"]
    }
}

/// A collection still being filled.
enum Frame {
    Sequence {
        items: Vec<Node>,
        anchor: usize,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        key: Option<Node>,
        anchor: usize,
    },
}

/// Builds a [`Node`] tree from parser events.
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Node>,
    root: Option<Node>,
    documents: usize,
    error: Option<ScanError>,
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.handle(event, mark) {
            self.error = Some(e);
        }
    }
}

impl TreeBuilder {
    fn handle(&mut self, event: Event, mark: Marker) -> std::result::Result<(), ScanError> {
        match event {
            Event::DocumentStart => {
                self.documents += 1;
                self.anchors.clear();
            }
            Event::SequenceStart(anchor, _) => self.stack.push(Frame::Sequence {
                items: Vec::new(),
                anchor,
            }),
            Event::MappingStart(anchor, _) => self.stack.push(Frame::Mapping {
                entries: Vec::new(),
                key: None,
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (node, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence { items, anchor }) => (Node::Sequence(items), anchor),
                    Some(Frame::Mapping {
                        entries, anchor, ..
                    }) => (Node::Mapping(entries), anchor),
                    None => return Err(ScanError::new(mark, "unbalanced end of collection")),
                };
                self.insert(node, anchor, mark)?;
            }
            Event::Scalar(value, style, anchor, tag) => {
                self.insert(scalar(value, style, tag.as_ref()), anchor, mark)?;
            }
            Event::Alias(id) => {
                let node = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| ScanError::new(mark, "alias to an unknown anchor"))?;
                self.insert(node, 0, mark)?;
            }
            Event::Nothing | Event::StreamStart | Event::StreamEnd | Event::DocumentEnd => {}
        }
        Ok(())
    }

    fn insert(
        &mut self,
        node: Node,
        anchor: usize,
        mark: Marker,
    ) -> std::result::Result<(), ScanError> {
        // ids start at 1
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        match self.stack.last_mut() {
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None => *key = Some(node),
                Some(k) => {
                    let resolved = k.to_value();
                    if entries.iter().any(|(existing, _)| existing.to_value() == resolved) {
                        return Err(ScanError::new_string(
                            mark,
                            format!("duplicated key in mapping: {:?}", resolved),
                        ));
                    }
                    entries.push((k, node));
                }
            },
        }
        Ok(())
    }

    fn finish(self) -> std::result::Result<Node, ScanError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        if self.documents > 1 {
            tracing::debug!(
                "Ignoring {} documents after the first one",
                self.documents - 1
            );
        }
        // an empty stream is a null document
        Ok(self.root.unwrap_or_else(|| Node::plain("")))
    }
}

fn scalar(value: String, style: TScalarStyle, tag: Option<&Tag>) -> Node {
    if style != TScalarStyle::Plain {
        return Node::quoted(value);
    }
    match tag {
        None => Node::plain(value),
        Some(Tag { handle, suffix })
            if handle == CORE_SCHEMA
                && matches!(suffix.as_str(), "null" | "bool" | "int" | "float") =>
        {
            Node::plain(value)
        }
        Some(_) => Node::quoted(value),
    }
}

/// Reads a configuration document from disk, enforcing [`MAX_DOCUMENT_SIZE`].
///
/// # Examples
///
/// ```rust,no_run
/// use cfgexpand::adapters::read_document;
///
/// let text = read_document("/etc/myapp/config.yaml").unwrap();
/// ```
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    // Check file size before reading to prevent DoS via large files
    let metadata = fs::metadata(path)?;
    if metadata.len() > MAX_DOCUMENT_SIZE {
        return Err(ExpandError::InputTooLarge {
            size: metadata.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }

    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ScalarStyle, ScalarTag};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Node {
        YamlDocumentParser::new().parse(text).unwrap()
    }

    #[test]
    fn test_yaml_parser_simple() {
        let doc = parse("key: value\nnumber: 42");

        assert_eq!(doc.get("key"), Some(&Node::plain("value")));
        match doc.get("number") {
            Some(Node::Scalar { tag, style, .. }) => {
                assert_eq!(*tag, Some(ScalarTag::Int));
                assert_eq!(*style, ScalarStyle::Plain);
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn test_yaml_parser_quoted_scalars() {
        let doc = parse("double: \"${PORT:80}\"\nsingle: '${PORT:80}'\nplain: ${PORT:80}");

        assert_eq!(doc.get("double"), Some(&Node::quoted("${PORT:80}")));
        assert_eq!(doc.get("single"), Some(&Node::quoted("${PORT:80}")));
        assert_eq!(doc.get("plain"), Some(&Node::plain("${PORT:80}")));
    }

    #[test]
    fn test_yaml_parser_quoted_number_is_string() {
        let doc = parse("name: \"8080\"");
        match doc.get("name") {
            Some(Node::Scalar { tag, style, .. }) => {
                assert_eq!(*tag, Some(ScalarTag::Str));
                assert_eq!(*style, ScalarStyle::Quoted);
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn test_yaml_parser_block_scalars_are_quoted() {
        let doc = parse("literal: |\n  ${N:5}\nfolded: >\n  42\n");
        assert_eq!(doc.get("literal"), Some(&Node::quoted("${N:5}\n")));
        assert_eq!(doc.get("folded"), Some(&Node::quoted("42\n")));
    }

    #[test]
    fn test_yaml_parser_nested() {
        let yaml = r#"
database:
  host: localhost
  ports:
    - 5432
    - 5433
"#;
        let doc = parse(yaml);
        let database = doc.get("database").unwrap();
        assert_eq!(database.get("host"), Some(&Node::plain("localhost")));
        assert_eq!(
            database.get("ports"),
            Some(&Node::Sequence(vec![Node::plain("5432"), Node::plain("5433")]))
        );
    }

    #[test]
    fn test_yaml_parser_drops_comments() {
        let doc = parse("# uses ${SECRET}\nkey: value # ${SECRET:?boom}");
        assert_eq!(doc, Node::Mapping(vec![(Node::plain("key"), Node::plain("value"))]));
    }

    #[test]
    fn test_yaml_parser_json_input() {
        let doc = parse(r#"{"port": 8080, "host": "${HOST}"}"#);
        assert_eq!(doc.get("port"), Some(&Node::plain("8080")));
        assert_eq!(doc.get("host"), Some(&Node::quoted("${HOST}")));
    }

    #[test]
    fn test_yaml_parser_non_mapping_roots() {
        assert_eq!(
            parse("- ${A:1}\n- b"),
            Node::Sequence(vec![Node::plain("${A:1}"), Node::plain("b")])
        );
        assert_eq!(
            parse(r#"["${A:x}", 2]"#),
            Node::Sequence(vec![Node::quoted("${A:x}"), Node::plain("2")])
        );
        assert_eq!(parse("${A:5}"), Node::plain("${A:5}"));
    }

    #[test]
    fn test_yaml_parser_empty_document_is_null() {
        assert_eq!(parse(""), Node::plain(""));
        assert_eq!(parse("# only a comment\n"), Node::plain(""));
    }

    #[test]
    fn test_yaml_parser_resolves_aliases() {
        let doc = parse("base: &b\n  x: ${A:1}\nother: *b\nname: &n svc\ncopy: *n");
        let base = Node::Mapping(vec![(Node::plain("x"), Node::plain("${A:1}"))]);
        assert_eq!(doc.get("base"), Some(&base));
        assert_eq!(doc.get("other"), Some(&base));
        assert_eq!(doc.get("copy"), Some(&Node::plain("svc")));
    }

    #[test]
    fn test_yaml_parser_tags() {
        let doc = parse("s: !!str ${A:5}\ni: !!int 7\ncustom: !secret 42");
        assert_eq!(doc.get("s"), Some(&Node::quoted("${A:5}")));
        assert_eq!(doc.get("i"), Some(&Node::plain("7")));
        assert_eq!(doc.get("custom"), Some(&Node::quoted("42")));
    }

    #[test]
    fn test_yaml_parser_keeps_first_document() {
        assert_eq!(
            parse("a: 1\n---\nb: 2\n"),
            Node::Mapping(vec![(Node::plain("a"), Node::plain("1"))])
        );
    }

    #[test]
    fn test_yaml_parser_duplicate_key() {
        let result = YamlDocumentParser::new().parse("a: 1\n\"a\": 2");
        assert!(matches!(result, Err(ExpandError::ParseError { .. })));
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let parser = YamlDocumentParser::new();
        let result = parser.parse("key: [unclosed");
        assert!(matches!(result, Err(ExpandError::ParseError { .. })));
    }

    #[test]
    fn test_yaml_parser_error_keeps_source() {
        let err = YamlDocumentParser::new()
            .parse("key: [unclosed")
            .unwrap_err();
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlDocumentParser::new();
        assert_eq!(parser.supported_extensions(), &["yaml", "yml", "json"]);
    }

    #[test]
    fn test_read_document() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "key: value").unwrap();

        let text = read_document(file.path()).unwrap();
        assert_eq!(text, "key: value\n");
    }

    #[test]
    fn test_read_document_missing_file() {
        let result = read_document("/nonexistent/path/config.yaml");
        assert!(matches!(result, Err(ExpandError::IoError(_))));
    }
}
