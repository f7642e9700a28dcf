//! Metric and ping definitions
//!
//! This module holds the typed tree of definitions a generation run works on.
//! A [`Catalog`] owns every [`Metric`] (grouped by category) and every explicit
//! [`Ping`]. Metrics are ordered by category, then by name, so that everything
//! derived from the catalog is deterministic whatever the input order.
//!
//! The [`load`] function reads the YAML definition files. It understands the
//! `$schema` header to tell metrics files from pings files, resolves the
//! `default` pseudo-ping, and rejects malformed names, unknown metric types,
//! duplicates and reserved ping names.

mod loader;
mod metric;
mod metric_type;
mod ping;
mod tree;

pub use loader::{load, load_str};
pub use metric::{ExtraKey, Metric};
pub use metric_type::{ExtraKeyType, MetricType};
pub use ping::{DEFAULT_EVENTS_PING, Ping};
pub use tree::Catalog;
