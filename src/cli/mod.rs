//! CLI command implementations
//!
//! This module contains all CLI command handlers, organized by category:
//! - `generate`: Validator unit generation
//! - `inspect`: Contract checking and IR output
//! - `config`: Schema commands
//! - `util`: Shared utility functions

pub mod config;
pub mod generate;
pub mod inspect;
pub mod util;

// Re-export all command functions for convenient access
pub use config::cmd_schema;
pub use generate::cmd_generate;
pub use inspect::{cmd_check, cmd_ir};
