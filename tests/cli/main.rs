//! CLI integration tests for tagdown.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (render, batch, tokens)
//! - Stdin/stdout handling
//! - Exit codes
//! - Config discovery

mod batch;
mod common;
mod render;
mod tokens;
