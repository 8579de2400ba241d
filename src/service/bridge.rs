// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hand-off from the expanded document tree to `serde_yaml`.
//!
//! The tree is rendered back to YAML text and that text is decoded into the
//! caller's type, so type coercion is entirely `serde_yaml`'s.

use crate::domain::{Node, Result};
use serde::de::DeserializeOwned;

/// Serializes an expanded document back to YAML text.
pub fn to_yaml_string(node: &Node) -> Result<String> {
    Ok(serde_yaml::to_string(&node.to_value())?)
}

/// Decodes an expanded document into `T`.
pub fn decode<T: DeserializeOwned>(node: &Node) -> Result<T> {
    let text = to_yaml_string(node)?;
    tracing::trace!("Decoding expanded document:\n{}", text);
    Ok(serde_yaml::from_str(&text)?)
}
