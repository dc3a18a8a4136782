//! Line server module - JSON-RPC host for line widgets
//!
//! This module provides a stdio JSON-RPC server that owns named line widgets,
//! applies edits from a client and hands back rebuilt meshes.
//!
//! # Module Structure
//! - `protocol` - JSON-RPC request/response types
//! - `state` - Server state management
//! - `util` - Logging setup and debug/profiling switches
//! - `handlers` - Request handlers organized by functionality

pub mod handlers;
pub mod protocol;
pub mod state;
pub mod util;

// Re-export key types for convenience
pub use protocol::{Request, Response, ErrorResponse, error_codes};
pub use state::ServerState;
pub use handlers::dispatch;
