// src/lib.rs
// CommonTrace MCP server - agent-facing frontend for the CommonTrace API

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod breaker;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod http;
pub mod mcp;
pub mod responses;

pub use error::{Result, TraceError};
