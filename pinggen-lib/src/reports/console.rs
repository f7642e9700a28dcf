use crate::Result;
use crate::codegen::{Diagnostic, Plan, Severity, Verdict};
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write a per-ping summary of what a generation run would emit.
pub fn generate<W: Write>(plan: &Plan<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    let status = match plan.verdict {
        Verdict::Proceed => format!("ready to generate {}", plan.target.file_name()),
        Verdict::Abort(reason) => format!("nothing to generate: {reason}"),
    };
    let status = if use_colors {
        match plan.verdict {
            Verdict::Proceed => status.green().bold().to_string(),
            Verdict::Abort(_) => status.red().bold().to_string(),
        }
    } else {
        status
    };
    writeln!(writer, "Target {}: {status}", plan.target)?;

    for (ping, group) in plan.aggregation.pings() {
        writeln!(writer)?;
        if use_colors {
            writeln!(writer, "{}", ping.bold())?;
        } else {
            writeln!(writer, "{ping}")?;
        }

        let type_width = group.iter().map(|(metric_type, _)| metric_type.as_str().len()).max().unwrap_or(0);
        for (metric_type, metrics) in group.iter() {
            for metric in metrics {
                writeln!(writer, "  {:<type_width$} : {metric}", metric_type.as_str())?;
            }
        }
    }

    Ok(())
}

/// Write one line per diagnostic, prefixed by a severity marker.
pub fn generate_diagnostics<W: Write>(diagnostics: &[Diagnostic], use_colors: bool, writer: &mut W) -> Result<()> {
    for diagnostic in diagnostics {
        let (marker, message) = match diagnostic.severity {
            Severity::Warning if use_colors => ("⚠️", diagnostic.message.yellow().to_string()),
            Severity::Error if use_colors => ("❌", diagnostic.message.red().to_string()),
            Severity::Warning => ("⚠️", diagnostic.message.clone()),
            Severity::Error => ("❌", diagnostic.message.clone()),
        };
        writeln!(writer, "{marker} {message}")?;
    }

    Ok(())
}
