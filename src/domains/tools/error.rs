//! Tool-specific error types.
//!
//! Every failure of a tool call ends up as one `ToolError`, whose display
//! text is what the MCP client receives. Schema violations are reported as
//! `Invalid input: ...`, everything else as `API call failed: ...`.

use thiserror::Error;

use super::endpoint::ResolveError;
use super::validator::ValidationError;
use crate::domains::explorer::ApiError;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The call request carried an empty tool name.
    #[error("API call failed: Missing tool name")]
    MissingToolName,

    /// The call request carried no argument object.
    #[error("API call failed: Missing arguments")]
    MissingArguments,

    /// Invalid arguments were provided to the tool.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The invocation could not be mapped to an endpoint.
    #[error("API call failed: {0}")]
    Resolve(#[from] ResolveError),

    /// The explorer request failed.
    #[error("API call failed: {0}")]
    Api(#[from] ApiError),

    /// The call was cancelled by the client before it completed.
    #[error("API call failed: request cancelled")]
    Cancelled,
}
