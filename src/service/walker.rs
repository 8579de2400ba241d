// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document tree traversal.

use crate::domain::{Node, Result, ScalarStyle, ScalarTag};

/// Rewrites every value scalar of `node` with `f`, in document order.
///
/// Mapping keys are left untouched. The walk stops at the first error and
/// returns it; scalars visited before the failure keep their new text.
///
/// When a plain scalar that was typed as a string changes, its tag is cleared so
/// the new text gets its type inferred again: `${PORT:8080}` becomes the integer
/// `8080`, while `"${PORT:8080}"` stays the string `"8080"`.
///
/// # Examples
///
/// ```rust
/// use cfgexpand::domain::Node;
/// use cfgexpand::service::walker::walk_scalars;
///
/// let mut doc = Node::Mapping(vec![(Node::plain("name"), Node::plain("world"))]);
/// walk_scalars(&mut doc, &mut |text: &str| Ok(text.to_uppercase())).unwrap();
/// assert_eq!(doc.get("name").and_then(Node::as_str), Some("WORLD"));
/// ```
pub fn walk_scalars<F>(node: &mut Node, f: &mut F) -> Result<()>
where
    F: FnMut(&str) -> Result<String>,
{
    match node {
        Node::Scalar { value, tag, style } => {
            let rewritten = f(value.as_str())?;
            if rewritten != *value {
                if *style == ScalarStyle::Plain && *tag == Some(ScalarTag::Str) {
                    *tag = None;
                }
                *value = rewritten;
            }
            Ok(())
        }
        Node::Mapping(entries) => {
            for (_, value) in entries.iter_mut() {
                walk_scalars(value, f)?;
            }
            Ok(())
        }
        Node::Sequence(items) => {
            for item in items.iter_mut() {
                walk_scalars(item, f)?;
            }
            Ok(())
        }
    }
}
