// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing implementations of the ports.
//!
//! This module contains the concrete environment stores and document parsers the
//! expansion engine can be wired to.

pub mod map_env;
pub mod process_env;
pub mod yaml_parser;

pub use map_env::MapEnvironment;
pub use process_env::ProcessEnvironment;
pub use yaml_parser::{read_document, YamlDocumentParser, MAX_DOCUMENT_SIZE};
