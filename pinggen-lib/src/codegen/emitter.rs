use super::{AbortReason, Aggregation, Diagnostic, Target, Verdict, aggregate, validate};
use crate::Result;
use crate::catalog::Catalog;
use crate::render::{RenderContext, RenderOptions, render};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use std::fs;

/// Identifies the generator in emitted files.
pub const VERSION_STRING: &str = concat!("pinggen v", env!("CARGO_PKG_VERSION"));

/// The outcome of the aggregation and validation passes, before anything is written.
#[derive(Debug)]
pub struct Plan<'a> {
    pub target: Target,
    pub aggregation: Aggregation<'a>,
    pub diagnostics: Vec<Diagnostic>,
    pub verdict: Verdict,
}

/// What an emission run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The artifact was written at this path.
    Generated(Utf8PathBuf),

    /// Nothing was written.
    Aborted(AbortReason),
}

/// The result of an emission run together with everything worth reporting about it.
#[derive(Debug)]
pub struct EmitReport {
    pub emission: Emission,
    pub diagnostics: Vec<Diagnostic>,
}

impl EmitReport {
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        matches!(self.emission, Emission::Generated(_))
    }
}

/// Run the type filter, aggregator and validator over `catalog`.
#[must_use]
pub fn plan(catalog: &Catalog, target: Target) -> Plan<'_> {
    let (aggregation, mut diagnostics) = aggregate(catalog, target);
    let verdict = validate(catalog.has_ping_definitions(), &aggregation, &diagnostics);

    if let Verdict::Abort(reason) = verdict {
        diagnostics.push(reason.into());
    }

    Plan {
        target,
        aggregation,
        diagnostics,
        verdict,
    }
}

/// Generate the artifact for `catalog` into `output_dir`.
///
/// An aborted run is not an error: it writes nothing and reports why through the returned diagnostics.
///
/// # Errors
///
/// Returns an error if rendering fails or the artifact cannot be written.
pub fn emit(catalog: &Catalog, target: Target, options: &RenderOptions, output_dir: &Utf8Path) -> Result<EmitReport> {
    let plan = plan(catalog, target);

    let emission = match plan.verdict {
        Verdict::Abort(reason) => {
            log::info!("not generating {target} output: {reason}");
            Emission::Aborted(reason)
        }
        Verdict::Proceed => Emission::Generated(write_artifact(&plan, options, output_dir)?),
    };

    Ok(EmitReport {
        emission,
        diagnostics: plan.diagnostics,
    })
}

fn write_artifact(plan: &Plan<'_>, options: &RenderOptions, output_dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let context = RenderContext {
        version_string: VERSION_STRING,
        aggregation: &plan.aggregation,
        has_event_metric: plan.aggregation.has_event_metric(),
        options,
    };

    let mut source = String::new();
    render(plan.target, &context, &mut source)?;

    fs::create_dir_all(output_dir).into_app_err_with(|| format!("creating output directory '{output_dir}'"))?;

    let path = output_dir.join(plan.target.file_name());
    fs::write(&path, source).into_app_err_with(|| format!("writing '{path}'"))?;

    log::info!("generated '{path}'");
    Ok(path)
}
