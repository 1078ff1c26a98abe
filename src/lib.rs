//! Exec-dir MCP Library
//!
//! Directory-scoped command execution server. Runs shell commands inside
//! a whitelisted set of working directories with bounded execution time,
//! exposed as a single MCP tool over stdio.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use exec_dir_mcp::{ExecDirServer, types::Config};
//!
//! let server = ExecDirServer::new(Config {
//!     default_dir: "/home/user/projects".into(),
//!     allowed_dirs: vec!["/home/user/projects".into(), "/tmp".into()],
//! });
//! // Serve via stdio or call tools directly
//! ```

pub mod authorizer;
pub mod cli;
pub mod params;
pub mod runner;
pub mod server;
pub mod service;
pub mod types;

// Re-export main server type
pub use server::ExecDirServer;

// Re-export parameter types for direct API usage
pub use params::ExecuteCommandParams;
