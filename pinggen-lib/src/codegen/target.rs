use crate::catalog::{ExtraKeyType, Metric, MetricType};
use crate::render::naming::camelize;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::Display;

/// The language code is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Target {
    /// Go server-side event logging
    #[default]
    Go,

    /// JavaScript server-side event logging
    Javascript,
}

impl Target {
    /// Whether metrics of the given type can be emitted for this target.
    ///
    /// Every metric type is listed explicitly so that adding one forces a decision here.
    #[must_use]
    pub const fn supports(self, metric_type: MetricType) -> bool {
        match self {
            Self::Go => go_supports(metric_type),
            Self::Javascript => javascript_supports(metric_type),
        }
    }

    /// The target-language type an event extra key of the given type is declared as,
    /// or `None` when the target has no translation for it.
    #[must_use]
    pub const fn extra_type_name(self, extra_type: ExtraKeyType) -> Option<&'static str> {
        match (self, extra_type) {
            (Self::Go, ExtraKeyType::String) => Some("string"),
            (Self::Go, ExtraKeyType::Quantity) => Some("int64"),
            (Self::Go, ExtraKeyType::Boolean) => None,
            (Self::Javascript, ExtraKeyType::String) => Some("string"),
            (Self::Javascript, ExtraKeyType::Quantity) => Some("number"),
            (Self::Javascript, ExtraKeyType::Boolean) => Some("boolean"),
        }
    }

    /// The name a metric is known by in generated code.
    ///
    /// Go uses the camel-cased category and name; JavaScript joins them with
    /// underscores. Distinct metrics can map to the same name.
    #[must_use]
    pub fn metric_identifier(self, metric: &Metric) -> String {
        match self {
            Self::Go => format!("{}{}", camelize(&metric.category), camelize(&metric.name)),
            Self::Javascript => format!("{}_{}", metric.category.replace('.', "_"), metric.name),
        }
    }

    /// Name of the single file produced for this target.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Go => "server_events.go",
            Self::Javascript => "server_events.js",
        }
    }
}

const fn go_supports(metric_type: MetricType) -> bool {
    match metric_type {
        MetricType::String | MetricType::Quantity | MetricType::Event => true,
        MetricType::Boolean
        | MetricType::Counter
        | MetricType::CustomDistribution
        | MetricType::Datetime
        | MetricType::Denominator
        | MetricType::DualLabeledCounter
        | MetricType::Jwe
        | MetricType::LabeledBoolean
        | MetricType::LabeledCounter
        | MetricType::LabeledCustomDistribution
        | MetricType::LabeledMemoryDistribution
        | MetricType::LabeledQuantity
        | MetricType::LabeledString
        | MetricType::LabeledTimingDistribution
        | MetricType::MemoryDistribution
        | MetricType::Object
        | MetricType::Rate
        | MetricType::StringList
        | MetricType::Text
        | MetricType::Timespan
        | MetricType::TimingDistribution
        | MetricType::Url
        | MetricType::Uuid => false,
    }
}

const fn javascript_supports(metric_type: MetricType) -> bool {
    match metric_type {
        MetricType::String => true,
        MetricType::Boolean
        | MetricType::Counter
        | MetricType::CustomDistribution
        | MetricType::Datetime
        | MetricType::Denominator
        | MetricType::DualLabeledCounter
        | MetricType::Event
        | MetricType::Jwe
        | MetricType::LabeledBoolean
        | MetricType::LabeledCounter
        | MetricType::LabeledCustomDistribution
        | MetricType::LabeledMemoryDistribution
        | MetricType::LabeledQuantity
        | MetricType::LabeledString
        | MetricType::LabeledTimingDistribution
        | MetricType::MemoryDistribution
        | MetricType::Object
        | MetricType::Quantity
        | MetricType::Rate
        | MetricType::StringList
        | MetricType::Text
        | MetricType::Timespan
        | MetricType::TimingDistribution
        | MetricType::Url
        | MetricType::Uuid => false,
    }
}
