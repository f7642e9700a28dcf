//! Command-line interface and orchestration for pinggen
//!
//! This module implements the CLI commands and ties the catalog loader, the
//! generation pipeline and the reports together. It handles argument parsing,
//! configuration management, and the high-level workflows.
//!
//! # Commands
//!
//! - **generate**: Load definition files, run the pipeline for the selected target,
//!   and write `server_events.go` or `server_events.js` to the output directory
//! - **validate**: Run the same pipeline without writing anything and print a
//!   per-ping summary, as text or JSON
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Generate and validate share the
//! `common` module, which sets up logging, loads `pinggen.toml`, resolves
//! the target and loads the definitions.
//!
//! A generation run that produces nothing is not an error: the diagnostics
//! explain why, and `--error-if-not-generated` turns it into a non-zero exit.

mod common;
mod config;
mod generate;
mod host;
mod init;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use generate::{GenerateArgs, generate_code};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_definitions};
