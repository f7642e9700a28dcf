use super::type_filter::{Classification, classify};
use super::{Diagnostic, Target};
use crate::catalog::{Catalog, Metric, MetricType};
use indexmap::IndexMap;
use std::collections::HashMap;

/// The metrics sent in one ping, bucketed by type.
///
/// Both the type buckets and the metrics inside each bucket are kept in the
/// order they were first encountered while traversing the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingGroup<'a> {
    metrics_by_type: IndexMap<MetricType, Vec<&'a Metric>>,
}

impl<'a> PingGroup<'a> {
    fn push(&mut self, metric: &'a Metric) {
        self.metrics_by_type.entry(metric.metric_type).or_default().push(metric);
    }

    /// Iterate over the type buckets in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricType, &[&'a Metric])> {
        self.metrics_by_type.iter().map(|(metric_type, metrics)| (*metric_type, metrics.as_slice()))
    }

    /// Type buckets other than events, which targets emit as plain fields.
    pub fn non_event_metrics(&self) -> impl Iterator<Item = (MetricType, &[&'a Metric])> {
        self.iter().filter(|(metric_type, _)| *metric_type != MetricType::Event)
    }

    #[must_use]
    pub fn metrics_of(&self, metric_type: MetricType) -> &[&'a Metric] {
        self.metrics_by_type.get(&metric_type).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn events(&self) -> &[&'a Metric] {
        self.metrics_of(MetricType::Event)
    }

    #[must_use]
    pub fn metric_count(&self) -> usize {
        self.metrics_by_type.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metric_count() == 0
    }
}

/// Metrics grouped by the pings they are sent in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation<'a> {
    pings: IndexMap<&'a str, PingGroup<'a>>,
    has_event_metric: bool,
}

impl<'a> Aggregation<'a> {
    /// Iterate over the pings in first-seen order.
    pub fn pings(&self) -> impl Iterator<Item = (&'a str, &PingGroup<'a>)> {
        self.pings.iter().map(|(name, group)| (*name, group))
    }

    #[must_use]
    pub fn ping(&self, name: &str) -> Option<&PingGroup<'a>> {
        self.pings.get(name)
    }

    #[must_use]
    pub fn contains_ping(&self, name: &str) -> bool {
        self.pings.contains_key(name)
    }

    /// Whether any supported event metric was found, regardless of where it is sent.
    #[must_use]
    pub const fn has_event_metric(&self) -> bool {
        self.has_event_metric
    }

    /// Number of pings holding at least one metric.
    #[must_use]
    pub fn populated_ping_count(&self) -> usize {
        self.pings.values().filter(|group| !group.is_empty()).count()
    }
}

/// Group the supported metrics of `catalog` by destination ping and type.
///
/// Metrics the target cannot emit are left out and reported through the returned diagnostics.
#[must_use]
pub fn aggregate(catalog: &Catalog, target: Target) -> (Aggregation<'_>, Vec<Diagnostic>) {
    let mut aggregation = Aggregation::default();
    let mut diagnostics = Vec::new();
    let mut names: HashMap<String, &Metric> = HashMap::new();

    for metric in catalog.metrics() {
        match classify(metric, target) {
            Classification::Supported => {}
            Classification::Unsupported(diagnostic) => {
                log::warn!("skipping metric '{metric}' of type '{}'", metric.metric_type);
                diagnostics.push(diagnostic);
                continue;
            }
            Classification::Rejected(rejections) => {
                log::warn!("rejecting metric '{metric}'");
                diagnostics.extend(rejections);
                continue;
            }
        }

        let name = target.metric_identifier(metric);
        if let Some(other) = names.get(&name) {
            log::warn!("rejecting metric '{metric}': name '{name}' is taken by '{other}'");
            diagnostics.push(Diagnostic::name_collision(metric, other, &name, target));
            continue;
        }
        let _ = names.insert(name, metric);

        if metric.is_event() {
            aggregation.has_event_metric = true;
        }

        for ping in &metric.send_in_pings {
            log::debug!("assigning '{metric}' to ping '{ping}'");
            aggregation.pings.entry(ping.as_str()).or_default().push(metric);
        }
    }

    (aggregation, diagnostics)
}
