//! Input/output operations for collection building
//!
//! This module contains the wrappers around the generation core:
//! - Configuration loading and shape validation
//! - Command-line interface and run orchestration
//! - Progress display, archiving, and error handling

/// Zip packaging of the rendered collection directory
pub mod archive;
/// Command-line interface and collection build orchestration
pub mod cli;
/// JSON configuration loading and shape validation
pub mod config;
/// Runtime defaults and fixed output naming
pub mod configuration;
/// Error types for collection building operations
pub mod error;
/// Collection-level progress reporting
pub mod progress;
