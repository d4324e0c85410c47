//! Tools domain module.
//!
//! This module handles everything between an MCP `tools/call` request and
//! the text handed back to the client.
//!
//! ## Architecture
//!
//! - `registry.rs` - The fixed catalog of tools and their input schemas
//! - `params.rs` - Parameter names and the typed per-tool parameter records
//! - `validator.rs` - Argument validation against a tool's schema
//! - `endpoint.rs` - Declarative tool → REST endpoint table and resolver
//! - `formatter.rs` - Rendering of explorer responses to text
//! - `dispatcher.rs` - The pipeline tying the above to the explorer client
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Reuse or add a parameter record in `params.rs`
//! 2. Add a `ToolDefinition` to `TOOLS` in `registry.rs`
//! 3. Add its `EndpointSpec` to `ENDPOINTS` in `endpoint.rs`
//!
//! The tests in `endpoint.rs` fail until both tables agree.

mod dispatcher;
mod endpoint;
mod error;
mod formatter;
mod params;
mod registry;
mod validator;

pub use dispatcher::ToolDispatcher;
pub use endpoint::{ENDPOINTS, EndpointResolver, EndpointSpec, ResolveError, Resolved};
pub use error::ToolError;
pub use formatter::ResponseFormat;
pub use params::{Arguments, Param, ToolArguments, ToolParams};
pub use registry::{TOOLS, ToolDefinition, ToolRegistry};
pub use validator::{FieldIssue, ValidationError, validate};
