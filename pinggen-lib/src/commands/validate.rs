use super::Host;
use super::common::{CommonArgs, Session, report_diagnostics};
use crate::Result;
use crate::codegen::{Verdict, plan};
use crate::reports::{generate_console, generate_json};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Check definition files and summarize what would be generated, without writing anything
///
/// Exits with status code 1 when the definitions would not produce any output.
///
/// # Errors
///
/// Returns an error if the configuration or definitions cannot be loaded
pub fn validate_definitions<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let session = match Session::new(&args.common) {
        Ok(session) => session,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Validation failed: {e}");
            host.exit(1);
            return Err(e);
        }
    };

    let plan = plan(&session.catalog, session.target);

    let mut summary = String::new();
    if args.json {
        generate_json(&plan, &mut summary)?;
        summary.push('\n');
    } else {
        generate_console(&plan, args.common.color.use_colors(&std::io::stdout()), &mut summary)?;
        report_diagnostics(host, &plan.diagnostics, args.common.color)?;
    }
    let _ = write!(host.output(), "{summary}");

    if let Verdict::Abort(_) = plan.verdict {
        host.exit(1);
    }

    Ok(())
}
