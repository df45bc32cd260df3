//! Shared utilities for the DarvaX client
//!
//! This crate provides common functionality used across the workspace,
//! currently the tracing subscriber setup shared by the library tests and the CLI.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_default};
