// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document tree types.
//!
//! A parsed configuration document is represented as an owned tree of [`Node`]s.
//! Only scalar nodes carry expandable text. Each scalar remembers the type that was
//! inferred for it at parse time and whether it was written plain or quoted, so that
//! a rewritten plain scalar can have its type inferred again from the new text.

use serde_yaml::Value;

/// The type a scalar resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarTag {
    /// `~`, `null`, or an empty plain scalar
    Null,
    /// `true` / `false`
    Bool,
    /// An integer
    Int,
    /// A floating point number
    Float,
    /// Any other text
    Str,
}

impl ScalarTag {
    /// Infers the tag a plain scalar with this text resolves to.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgexpand::domain::ScalarTag;
    ///
    /// assert_eq!(ScalarTag::infer("8080"), ScalarTag::Int);
    /// assert_eq!(ScalarTag::infer("0.5"), ScalarTag::Float);
    /// assert_eq!(ScalarTag::infer("true"), ScalarTag::Bool);
    /// assert_eq!(ScalarTag::infer(""), ScalarTag::Null);
    /// assert_eq!(ScalarTag::infer("${PORT:8080}"), ScalarTag::Str);
    /// ```
    pub fn infer(text: &str) -> Self {
        match resolve_plain(text) {
            Value::Null => ScalarTag::Null,
            Value::Bool(_) => ScalarTag::Bool,
            Value::Number(n) if n.is_f64() => ScalarTag::Float,
            Value::Number(_) => ScalarTag::Int,
            _ => ScalarTag::Str,
        }
    }
}

/// How a scalar was written in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// Unquoted; its type is inferred from its text
    Plain,
    /// Single or double quoted, a `|`/`>` block, or tagged as a string; always a string
    Quoted,
}

/// A node of a parsed configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf value.
    Scalar {
        /// The scalar's text
        value: String,
        /// The inferred type, or `None` when it must be inferred again
        tag: Option<ScalarTag>,
        /// How the scalar was written
        style: ScalarStyle,
    },
    /// Key/value pairs in document order.
    Mapping(Vec<(Node, Node)>),
    /// Items in document order.
    Sequence(Vec<Node>),
}

impl Node {
    /// Creates a plain scalar, inferring its tag from the text.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        let tag = ScalarTag::infer(&value);
        Node::Scalar {
            value,
            tag: Some(tag),
            style: ScalarStyle::Plain,
        }
    }

    /// Creates a quoted scalar, which is always a string.
    pub fn quoted(value: impl Into<String>) -> Self {
        Node::Scalar {
            value: value.into(),
            tag: Some(ScalarTag::Str),
            style: ScalarStyle::Quoted,
        }
    }

    /// Returns the text of a scalar node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Looks up a mapping value by its key text.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Converts the tree into a `serde_yaml::Value`.
    ///
    /// Untagged plain scalars have their type inferred from their current text;
    /// everything tagged `Str` stays a string.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Scalar {
                value,
                tag: Some(ScalarTag::Str),
                ..
            } => Value::String(value.clone()),
            Node::Scalar { value, .. } => resolve_plain(value),
            Node::Mapping(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_value(), v.to_value()))
                    .collect(),
            ),
            Node::Sequence(items) => Value::Sequence(items.iter().map(Node::to_value).collect()),
        }
    }
}

/// Resolves plain scalar text to a null, boolean, number or string value.
fn resolve_plain(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if !may_be_typed(trimmed) {
        return Value::String(text.to_string());
    }
    match serde_yaml::from_str::<Value>(trimmed) {
        Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_))) => value,
        _ => Value::String(text.to_string()),
    }
}

/// Rejects text that YAML would read as structure rather than as a scalar.
fn may_be_typed(text: &str) -> bool {
    if text.contains(&['#', '\n', ':', ',', '[', ']', '{', '}'][..]) {
        return false;
    }
    let mut chars = text.chars();
    match chars.next() {
        Some('-') => matches!(chars.next(), Some(c) if c.is_ascii_digit() || c == '.'),
        Some(c) => c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '~'),
        None => false,
    }
}
