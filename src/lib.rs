//! OpenAlex research tools
//!
//! Read-only access to the OpenAlex scholarly catalogue for tool-calling
//! agents. Every operation returns display-ready text; failures are rendered
//! as strings beginning with `Error`, never raised.
//!
//! # Architecture
//!
//! - [`query`] - Turns search requests into ordered OpenAlex query parameters
//! - [`abstract_text`] - Rebuilds plain abstracts from inverted indexes
//! - [`record`] - Tolerant accessors over loosely typed JSON records
//! - [`format`] - Renders works and authors into fixed text layouts
//! - [`client`] - HTTP transport and the three public operations
//! - [`tools`] - Agent-facing tool wrappers and tool-set assembly
//! - [`config`] - Externally supplied runtime settings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod abstract_text;
pub mod client;
pub mod config;
pub mod format;
pub mod query;
pub mod record;
pub mod tools;

#[cfg(test)]
pub mod test_support;

// Re-export commonly used types
pub use abstract_text::{InvertedIndex, MAX_ABSTRACT_POSITION, reconstruct_abstract};
pub use client::{OpenAlexClient, SERVICE_ERROR_PREFIX, ServiceError, WORK_NOT_FOUND};
pub use config::{DEFAULT_BASE_URL, OpenAlexConfig};
pub use format::{ConceptCap, FormatProfile, OverflowWording};
pub use query::{
    AuthorSort, AuthorsSearchRequest, QueryError, WorkSort, WorksSearchRequest, YearFilter,
};
pub use record::{Record, extract_id};
pub use tools::{Tool, ToolSet, build_tool_set};
