//! CLI module
//!
//! Command-line interface for running inference.
//!
//! # Commands
//!
//! - `infer` - Infer declarations and write a .proto file
//! - `inspect` - Infer and report registry statistics
//! - `validate` - Read a rendered .proto file back

mod commands;
mod runner;

pub use commands::{Cli, Commands, InputArgs, OutputFormat};
pub use runner::Runner;
