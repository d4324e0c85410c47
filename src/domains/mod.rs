//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: the MCP tool catalog and the dispatch pipeline
//! - **explorer**: the outbound Blockscout REST API client

pub mod explorer;
pub mod tools;
