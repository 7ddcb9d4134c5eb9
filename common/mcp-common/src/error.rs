//! Error helpers for MCP tool handlers

use rmcp::ErrorData as McpError;

/// Result type for MCP tool handlers
pub type McpResult<T> = Result<T, McpError>;

/// Build an internal error (the tool ran but something went wrong)
pub fn internal_error(message: impl Into<String>) -> McpError {
    McpError::internal_error(message.into(), None)
}

/// Build an invalid params error (the caller sent bad input)
///
/// No side effects have happened when this is returned, so callers can
/// fix their parameters and retry safely.
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}
