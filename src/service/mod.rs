// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer implementing the expansion engine.
//!
//! - [`resolver`] expands the references inside one piece of text
//! - [`walker`] applies a rewrite to every scalar value of a document
//! - [`bridge`] re-serializes an expanded document and decodes it
//! - [`Expander`] ties a parser, an environment and the above together

pub mod bridge;
pub mod expander;
pub mod resolver;
pub mod walker;

pub use expander::{read_limited, Expander};
pub use resolver::DEFAULT_BUDGET;
