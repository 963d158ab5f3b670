//! # Common Components
//!
//! Shared utilities and data structures used by the web server and the CLI.
//!
//! ## Modules
//!
//! - [`messages`]: JSON request/response bodies for the HTTP API
//! - [`config`]: Configuration parsing utilities

pub mod config;
pub mod messages;
