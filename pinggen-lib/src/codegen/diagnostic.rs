use super::{AbortReason, Target};
use crate::catalog::{ExtraKeyType, Metric};
use core::fmt::{Display, Formatter, Result as FmtResult};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A metric's type is not supported by the target; the metric was skipped.
    UnsupportedType,

    /// An event extra key has a type the target cannot translate.
    UntranslatableExtraType,

    /// Two metrics translate to the same name in generated code.
    NameCollision,

    /// Generation was aborted.
    Aborted(AbortReason),
}

/// A reportable condition found while preparing generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,

    /// The `category.name` of the offending metric, if any.
    pub subject: Option<String>,
}

impl Diagnostic {
    #[must_use]
    pub fn unsupported_type(metric: &Metric, target: Target) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::UnsupportedType,
            message: format!(
                "Ignoring metric '{metric}' of unsupported type '{}': the {target} target cannot emit it",
                metric.metric_type
            ),
            subject: Some(metric.identifier()),
        }
    }

    #[must_use]
    pub fn untranslatable_extra_type(metric: &Metric, key: &str, extra_type: ExtraKeyType, target: Target) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::UntranslatableExtraType,
            message: format!("Extra key '{key}' of event '{metric}' has type '{extra_type}' which the {target} target cannot translate"),
            subject: Some(metric.identifier()),
        }
    }

    #[must_use]
    pub fn name_collision(metric: &Metric, other: &Metric, name: &str, target: Target) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::NameCollision,
            message: format!("Metric '{metric}' and metric '{other}' both translate to the {target} name '{name}'"),
            subject: Some(metric.identifier()),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl From<AbortReason> for Diagnostic {
    fn from(reason: AbortReason) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::Aborted(reason),
            message: format!("{reason}. {}", reason.hint()),
            subject: None,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.message)
    }
}
