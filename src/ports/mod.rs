// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) for the collaborators the
//! expansion engine depends on: the environment store and the document parser.
//! These traits are implemented by adapters in the adapters layer.

pub mod environment;
pub mod parser;

// Re-export commonly used types
pub use environment::{validate_binding, Environment};
pub use parser::DocumentParser;
