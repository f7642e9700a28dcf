use super::{ExtraKeyType, MetricType};
use core::fmt::{Display, Formatter, Result as FmtResult};
use indexmap::IndexMap;

/// Description and type of a single event extra key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraKey {
    pub description: String,
    pub extra_type: ExtraKeyType,
}

/// A metric definition, identified by its category and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub category: String,
    pub name: String,
    pub metric_type: MetricType,
    pub description: String,

    /// Pings this metric is delivered in. Never empty once loaded.
    pub send_in_pings: Vec<String>,

    /// Extra keys carried by event metrics, in declaration order.
    pub extra_keys: IndexMap<String, ExtraKey>,
}

impl Metric {
    /// The dotted `category.name` identifier used in ping payloads.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.category, self.name)
    }

    #[must_use]
    pub fn is_event(&self) -> bool {
        self.metric_type == MetricType::Event
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.category, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(metric_type: MetricType) -> Metric {
        Metric {
            category: "backend".into(),
            name: "object_update".into(),
            metric_type,
            description: "Updates".into(),
            send_in_pings: vec!["events".into()],
            extra_keys: IndexMap::new(),
        }
    }

    #[test]
    fn test_identifier_joins_category_and_name() {
        let metric = sample(MetricType::Event);
        assert_eq!(metric.identifier(), "backend.object_update");
        assert_eq!(metric.to_string(), "backend.object_update");
    }

    #[test]
    fn test_is_event() {
        assert!(sample(MetricType::Event).is_event());
        assert!(!sample(MetricType::String).is_event());
    }
}
