use super::Host;
use super::common::{CommonArgs, Session, report_diagnostics};
use crate::Result;
use crate::codegen::{Emission, emit};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory where the generated file is written (created if missing)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Utf8PathBuf,

    /// Exit with status code 1 if no file was generated
    #[arg(long)]
    pub error_if_not_generated: bool,
}

/// Generate server-side code for the given definition files
///
/// A run that generates nothing still succeeds; the reason is printed as a diagnostic.
///
/// # Errors
///
/// Returns an error if the configuration or definitions cannot be loaded, or the output cannot be written
pub fn generate_code<H: Host>(host: &mut H, args: &GenerateArgs) -> Result<()> {
    let session = Session::new(&args.common)?;

    let report = emit(&session.catalog, session.target, &session.config.render_options(), &args.output_dir)?;
    report_diagnostics(host, &report.diagnostics, args.common.color)?;

    match &report.emission {
        Emission::Generated(path) => {
            let _ = writeln!(host.output(), "Generated {path}");
        }
        Emission::Aborted(reason) => {
            log::debug!("generation aborted: {reason:?}");
            if args.error_if_not_generated {
                host.exit(1);
            }
        }
    }

    Ok(())
}
