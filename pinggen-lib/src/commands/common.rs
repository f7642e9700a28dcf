//! Processing shared by the generate and validate commands.

use super::Host;
use super::config::Config;
use crate::Result;
use crate::catalog::{Catalog, load};
use crate::codegen::{Diagnostic, Target};
use crate::reports::generate_diagnostics;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use std::io::{IsTerminal, Write};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether output written to `stream` should be colored.
    pub fn use_colors(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the generate and validate commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Metric and ping definition files, processed in the order given
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<Utf8PathBuf>,

    /// Language to generate code for (overrides the configuration file)
    #[arg(long, short = 't', value_name = "TARGET")]
    pub target: Option<Target>,

    /// Path to configuration file (default is `pinggen.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Everything a command needs once arguments have been resolved.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub target: Target,
    pub catalog: Catalog,
}

impl Session {
    /// Initialize logging, then load the configuration and the definition files
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or any definition file cannot be loaded
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        let target = args.target.unwrap_or(config.target);
        log::info!("using target '{target}'");

        let catalog = load(&args.inputs)?;

        Ok(Self { config, target, catalog })
    }
}

/// Write diagnostics to the host's error stream.
pub fn report_diagnostics<H: Host>(host: &mut H, diagnostics: &[Diagnostic], color: ColorMode) -> Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }

    let mut text = String::new();
    generate_diagnostics(diagnostics, color.use_colors(&std::io::stderr()), &mut text)?;
    let _ = write!(host.error(), "{text}");
    Ok(())
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
