//! Command-line interface module
//!
//! This module contains the CLI structure and command implementations.

pub mod commands;

pub use commands::*;
