//! Configuration management module
//!
//! This module handles configuration loading, validation, and persistence
//! from command-line arguments, environment variables, the configuration
//! file, and default values.

pub mod settings;

pub use settings::*;
