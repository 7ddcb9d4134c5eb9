//! MCP Common - shared boundary utilities
//!
//! Used by every server and CLI in the workspace:
//!
//! - **Initialization**: [`init_tracing`] / [`init_tracing_at`] and the
//!   `serve_stdio!` macro
//! - **Results**: helpers for building `CallToolResult` responses
//! - **Errors**: helpers for building MCP error payloads
//!
//! # Example
//!
//! ```rust,ignore
//! use mcp_common::{serve_stdio, json_success};
//!
//! serve_stdio!(MyServer, "my_mcp");
//!
//! fn my_tool(&self) -> Result<CallToolResult, McpError> {
//!     json_success(&self.snapshot())
//! }
//! ```

pub mod error;
pub mod init;
pub mod result;

pub use error::{internal_error, invalid_params, McpResult};
pub use init::{init_tracing, init_tracing_at};
pub use result::{json_success, text_success};

// Re-export rmcp types that are commonly needed
pub use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
