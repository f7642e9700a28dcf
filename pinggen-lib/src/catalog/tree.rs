use super::{Metric, Ping};
use crate::Result;
use indexmap::IndexMap;
use indexmap::map::Entry;
use ohno::bail;
use std::collections::{BTreeMap, btree_map};

/// All metric and ping definitions of one generation run.
///
/// Metrics are kept sorted by category, then by name, so traversal does not
/// depend on key order in the YAML files or on the order of the files.
/// Pings keep the order in which they were added.
#[derive(Debug, Default)]
pub struct Catalog {
    categories: BTreeMap<String, BTreeMap<String, Metric>>,
    pings: IndexMap<String, Ping>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric to its category.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same category and name already exists.
    pub fn add_metric(&mut self, metric: Metric) -> Result<()> {
        let category = self.categories.entry(metric.category.clone()).or_default();
        match category.entry(metric.name.clone()) {
            btree_map::Entry::Occupied(_) => bail!("duplicate metric '{metric}'"),
            btree_map::Entry::Vacant(slot) => {
                let _ = slot.insert(metric);
                Ok(())
            }
        }
    }

    /// Add an explicit ping definition.
    ///
    /// # Errors
    ///
    /// Returns an error if a ping with the same name already exists.
    pub fn add_ping(&mut self, ping: Ping) -> Result<()> {
        match self.pings.entry(ping.name.clone()) {
            Entry::Occupied(_) => bail!("duplicate ping '{}'", ping.name),
            Entry::Vacant(slot) => {
                let _ = slot.insert(ping);
                Ok(())
            }
        }
    }

    /// Iterate over every metric, ordered by category, then by name.
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.categories.values().flat_map(BTreeMap::values)
    }

    pub fn pings(&self) -> impl Iterator<Item = &Ping> {
        self.pings.values()
    }

    #[must_use]
    pub fn ping(&self, name: &str) -> Option<&Ping> {
        self.pings.get(name)
    }

    /// Whether any ping definitions were supplied at all.
    #[must_use]
    pub fn has_ping_definitions(&self) -> bool {
        !self.pings.is_empty()
    }

    #[must_use]
    pub fn metric_count(&self) -> usize {
        self.categories.values().map(BTreeMap::len).sum()
    }
}
