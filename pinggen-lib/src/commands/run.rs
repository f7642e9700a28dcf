//! Command dispatch logic for pinggen

use super::{GenerateArgs, InitArgs, ValidateArgs, generate_code, init_config, validate_definitions};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "pinggen", author, version, long_about = None)]
#[command(about = "Generate server-side Glean telemetry code from metric and ping definitions")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: PinggenSubcommand,
}

#[derive(Subcommand, Debug)]
enum PinggenSubcommand {
    /// Generate server-side code for metric and ping definitions
    Generate(Box<GenerateArgs>),
    /// Check definitions and summarize what would be generated
    Validate(Box<ValidateArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        PinggenSubcommand::Generate(generate_args) => generate_code(host, generate_args),
        PinggenSubcommand::Validate(validate_args) => validate_definitions(host, validate_args),
        PinggenSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
