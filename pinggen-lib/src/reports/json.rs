use crate::Result;
use crate::codegen::{Diagnostic, Plan, PingGroup, Verdict};
use core::fmt::Write;
use serde_json::json;

/// Write a machine-readable summary of what a generation run would emit.
///
/// Pings and metric types are written as arrays so their order survives.
pub fn generate<W: Write>(plan: &Plan<'_>, writer: &mut W) -> Result<()> {
    let (generated_file, reason) = match plan.verdict {
        Verdict::Proceed => (Some(plan.target.file_name()), None),
        Verdict::Abort(reason) => (None, Some(reason.to_string())),
    };

    let pings: Vec<_> = plan
        .aggregation
        .pings()
        .map(|(name, group)| json!({ "name": name, "metrics": group_to_json(group) }))
        .collect();

    let output = json!({
        "target": plan.target.to_string(),
        "generated_file": generated_file,
        "abort_reason": reason,
        "has_event_metric": plan.aggregation.has_event_metric(),
        "pings": pings,
        "diagnostics": plan.diagnostics.iter().map(diagnostic_to_json).collect::<Vec<_>>(),
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn group_to_json(group: &PingGroup<'_>) -> serde_json::Value {
    json!(group
        .iter()
        .map(|(metric_type, metrics)| {
            json!({
                "type": metric_type.as_str(),
                "metrics": metrics.iter().map(|metric| metric.identifier()).collect::<Vec<_>>(),
            })
        })
        .collect::<Vec<_>>())
}

fn diagnostic_to_json(diagnostic: &Diagnostic) -> serde_json::Value {
    json!({
        "severity": diagnostic.severity.to_string(),
        "message": diagnostic.message,
        "subject": diagnostic.subject,
    })
}
