use super::{Aggregation, Diagnostic};
use crate::catalog::DEFAULT_EVENTS_PING;
use core::fmt::{Display, Formatter, Result as FmtResult};

/// Why generation was stopped before any output was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Some metric definitions cannot be translated for the target.
    InvalidMetrics,

    /// No ping definitions were supplied and there are no event metrics to fall back on.
    NoPingDefinition,

    /// Event metrics exist but none can reach a defined or default ping.
    MissingEventDestination,

    /// Nothing would be emitted.
    NoPingsWithMetrics,
}

impl AbortReason {
    /// Advice on how to fix the input.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::InvalidMetrics => "Fix the metric definitions reported above.",
            Self::NoPingDefinition | Self::NoPingsWithMetrics => {
                "Server-side code is generated as a single file, so all ping and metric definitions must be passed in one invocation."
            }
            Self::MissingEventDestination => "Send event metrics in the standard `events` ping or define a custom ping for them.",
        }
    }
}

impl Display for AbortReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::InvalidMetrics => "metric definitions cannot be translated for the target",
            Self::NoPingDefinition => "no ping definition found",
            Self::MissingEventDestination => "event metrics require a destination ping; define one or use the default",
            Self::NoPingsWithMetrics => "no pings with metrics found",
        })
    }
}

/// Whether generation may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Proceed,
    Abort(AbortReason),
}

/// Decide whether an aggregation can be emitted.
///
/// Rules are checked in order and the first failing one wins:
/// error diagnostics from aggregation, then ping definition requirements, then emptiness.
#[must_use]
pub fn validate(has_ping_definitions: bool, aggregation: &Aggregation<'_>, diagnostics: &[Diagnostic]) -> Verdict {
    if diagnostics.iter().any(Diagnostic::is_error) {
        return Verdict::Abort(AbortReason::InvalidMetrics);
    }

    if !has_ping_definitions {
        if !aggregation.has_event_metric() {
            return Verdict::Abort(AbortReason::NoPingDefinition);
        }

        // Events can still be delivered through the standard events ping.
        if !aggregation.contains_ping(DEFAULT_EVENTS_PING) {
            return Verdict::Abort(AbortReason::MissingEventDestination);
        }
    }

    if aggregation.populated_ping_count() == 0 {
        return Verdict::Abort(AbortReason::NoPingsWithMetrics);
    }

    Verdict::Proceed
}
