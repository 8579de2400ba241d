// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the document tree, the variable reference grammar and its
//! operator semantics, and the error types. It is independent of any particular
//! document format or environment store.

pub mod errors;
pub mod node;
pub mod reference;

// Re-export commonly used types
pub use errors::{ExpandError, Result};
pub use node::{Node, ScalarStyle, ScalarTag};
pub use reference::{Operator, Reference, DEFAULT_REQUIRED_MESSAGE};
