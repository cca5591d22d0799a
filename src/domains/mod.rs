//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: typed access to the NUSMods course catalog
//! - **tools**: the MCP tools that query the catalog and render reports

pub mod catalog;
pub mod tools;
