use super::{Diagnostic, Target};
use crate::catalog::Metric;

/// Outcome of checking a metric against a target's capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The metric can be emitted.
    Supported,

    /// The metric's type is outside the target's allow-list; the metric is skipped.
    Unsupported(Diagnostic),

    /// The metric's type is supported but part of its definition cannot be
    /// translated; generation must not proceed.
    Rejected(Vec<Diagnostic>),
}

/// Classify a single metric for the given target.
#[must_use]
pub fn classify(metric: &Metric, target: Target) -> Classification {
    if !target.supports(metric.metric_type) {
        return Classification::Unsupported(Diagnostic::unsupported_type(metric, target));
    }

    if !metric.is_event() {
        return Classification::Supported;
    }

    // only events carry extra keys into generated code
    let untranslatable: Vec<Diagnostic> = metric
        .extra_keys
        .iter()
        .filter(|(_, extra)| target.extra_type_name(extra.extra_type).is_none())
        .map(|(key, extra)| Diagnostic::untranslatable_extra_type(metric, key, extra.extra_type, target))
        .collect();

    if untranslatable.is_empty() {
        Classification::Supported
    } else {
        Classification::Rejected(untranslatable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ExtraKey, ExtraKeyType, MetricType};
    use crate::codegen::{DiagnosticKind, Severity};
    use indexmap::IndexMap;

    fn metric(metric_type: MetricType) -> Metric {
        Metric {
            category: "page".into(),
            name: "view".into(),
            metric_type,
            description: String::new(),
            send_in_pings: vec!["events".into()],
            extra_keys: IndexMap::new(),
        }
    }

    fn with_extra(mut metric: Metric, key: &str, extra_type: ExtraKeyType) -> Metric {
        let _ = metric.extra_keys.insert(
            key.into(),
            ExtraKey {
                description: String::new(),
                extra_type,
            },
        );
        metric
    }

    #[test]
    fn test_supported_types() {
        for metric_type in [MetricType::String, MetricType::Quantity, MetricType::Event] {
            assert_eq!(classify(&metric(metric_type), Target::Go), Classification::Supported);
        }
    }

    #[test]
    fn test_unsupported_type_carries_warning() {
        let Classification::Unsupported(diagnostic) = classify(&metric(MetricType::Timespan), Target::Go) else {
            panic!("timespan should be unsupported");
        };
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.kind, DiagnosticKind::UnsupportedType);
        assert!(diagnostic.message.contains("timespan"));
        assert!(diagnostic.message.contains("page.view"));
    }

    #[test]
    fn test_target_specific_allow_list() {
        assert_eq!(classify(&metric(MetricType::String), Target::Javascript), Classification::Supported);
        assert!(matches!(classify(&metric(MetricType::Quantity), Target::Javascript), Classification::Unsupported(_)));
    }

    #[test]
    fn test_translatable_extras_are_supported() {
        let event = with_extra(metric(MetricType::Event), "id", ExtraKeyType::String);
        let event = with_extra(event, "count", ExtraKeyType::Quantity);
        assert_eq!(classify(&event, Target::Go), Classification::Supported);
    }

    #[test]
    fn test_boolean_extra_is_rejected_for_go() {
        let event = with_extra(metric(MetricType::Event), "id", ExtraKeyType::String);
        let event = with_extra(event, "success", ExtraKeyType::Boolean);

        let Classification::Rejected(diagnostics) = classify(&event, Target::Go) else {
            panic!("boolean extra should be rejected");
        };
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
        assert!(diagnostics[0].message.contains("'success'"));
    }

    #[test]
    fn test_extras_on_non_event_are_ignored() {
        let string_metric = with_extra(metric(MetricType::String), "success", ExtraKeyType::Boolean);
        assert_eq!(classify(&string_metric, Target::Go), Classification::Supported);
    }
}
