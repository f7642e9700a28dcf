//! Loading of metric and ping definition files.
//!
//! Only the subset of the definition format needed for server-side code
//! generation is read; unknown metric fields are ignored.

use super::ping::{DEFAULT_EVENTS_PING, DEFAULT_METRICS_PING, DEFAULT_PING_ALIAS, is_reserved_ping_name};
use super::{Catalog, ExtraKey, ExtraKeyType, Metric, MetricType, Ping};
use crate::Result;
use camino::Utf8Path;
use indexmap::IndexMap;
use ohno::{IntoAppError, app_err, bail};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::sync::LazyLock;

static CATEGORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*(\.[a-z_][a-z0-9_]*)*$").expect("invalid regex"));
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("invalid regex"));
static PING_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9-]{0,29}$").expect("invalid regex"));

/// Category name that holds ping definitions and is therefore not available to metrics.
const PINGS_CATEGORY: &str = "pings";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Metrics,
    Pings,
}

#[derive(Debug, Deserialize)]
struct RawMetric {
    #[serde(rename = "type")]
    metric_type: MetricType,

    #[serde(default)]
    description: String,

    #[serde(default)]
    send_in_pings: Option<Vec<String>>,

    #[serde(default)]
    extra_keys: IndexMap<String, RawExtraKey>,
}

#[derive(Debug, Deserialize)]
struct RawExtraKey {
    #[serde(default)]
    description: String,

    #[serde(rename = "type", default)]
    extra_type: ExtraKeyType,
}

#[derive(Debug, Deserialize)]
struct RawPing {
    #[serde(default)]
    description: String,
}

/// Load every definition file into a single catalog, in the order given.
///
/// # Errors
///
/// Returns an error if a file cannot be read or contains invalid definitions
pub fn load<P: AsRef<Utf8Path>>(paths: &[P]) -> Result<Catalog> {
    let mut catalog = Catalog::new();
    for path in paths {
        let path = path.as_ref();
        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading definition file '{path}'"))?;
        load_str(&mut catalog, &text).into_app_err_with(|| format!("loading definitions from '{path}'"))?;
        log::debug!("loaded definitions from '{path}'");
    }

    log::info!(
        "loaded {} metric(s) and {} ping(s) from {} file(s)",
        catalog.metric_count(),
        catalog.pings().count(),
        paths.len()
    );

    Ok(catalog)
}

/// Add the definitions contained in one YAML document to `catalog`.
///
/// # Errors
///
/// Returns an error if the document is not valid YAML or contains invalid definitions
pub fn load_str(catalog: &mut Catalog, text: &str) -> Result<()> {
    let document: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(text).into_app_err("parsing YAML")?;

    match file_kind(&document)? {
        FileKind::Metrics => load_metrics(catalog, document),
        FileKind::Pings => load_pings(catalog, document),
    }
}

fn file_kind(document: &IndexMap<String, serde_yaml::Value>) -> Result<FileKind> {
    let schema = document
        .get("$schema")
        .ok_or_else(|| app_err!("missing '$schema' key"))?
        .as_str()
        .ok_or_else(|| app_err!("'$schema' must be a string"))?;

    if schema.contains("/metrics/") {
        Ok(FileKind::Metrics)
    } else if schema.contains("/pings/") {
        Ok(FileKind::Pings)
    } else {
        bail!("unrecognized schema '{schema}'")
    }
}

fn is_directive(key: &str) -> bool {
    key.starts_with('$') || key == "no_lint"
}

fn load_metrics(catalog: &mut Catalog, document: IndexMap<String, serde_yaml::Value>) -> Result<()> {
    for (category, value) in document {
        if is_directive(&category) {
            continue;
        }

        if category == PINGS_CATEGORY {
            bail!("'{PINGS_CATEGORY}' is reserved and cannot be used as a metric category");
        }

        if !CATEGORY_REGEX.is_match(&category) {
            bail!("invalid category name '{category}'");
        }

        let metrics: IndexMap<String, RawMetric> =
            serde_yaml::from_value(value).into_app_err_with(|| format!("parsing metrics of category '{category}'"))?;

        for (name, raw) in metrics {
            let metric = build_metric(&category, name, raw)?;
            catalog.add_metric(metric)?;
        }
    }

    Ok(())
}

fn build_metric(category: &str, name: String, raw: RawMetric) -> Result<Metric> {
    if !NAME_REGEX.is_match(&name) {
        bail!("invalid metric name '{name}' in category '{category}'");
    }

    for key in raw.extra_keys.keys() {
        if !NAME_REGEX.is_match(key) {
            bail!("invalid extra key '{key}' for metric '{category}.{name}'");
        }
    }

    let send_in_pings = resolve_send_in_pings(raw.metric_type, raw.send_in_pings);
    if send_in_pings.is_empty() {
        bail!("metric '{category}.{name}' has an empty 'send_in_pings' list");
    }

    let extra_keys = raw
        .extra_keys
        .into_iter()
        .map(|(key, extra)| {
            (
                key,
                ExtraKey {
                    description: extra.description,
                    extra_type: extra.extra_type,
                },
            )
        })
        .collect();

    Ok(Metric {
        category: category.to_string(),
        name,
        metric_type: raw.metric_type,
        description: raw.description,
        send_in_pings,
        extra_keys,
    })
}

/// Replace the `default` alias with the ping the metric type is delivered in by default.
fn resolve_send_in_pings(metric_type: MetricType, declared: Option<Vec<String>>) -> Vec<String> {
    let default_ping = if metric_type == MetricType::Event {
        DEFAULT_EVENTS_PING
    } else {
        DEFAULT_METRICS_PING
    };

    let declared = declared.unwrap_or_else(|| vec![DEFAULT_PING_ALIAS.to_string()]);
    let mut resolved: Vec<String> = Vec::with_capacity(declared.len());
    for ping in declared {
        let ping = if ping == DEFAULT_PING_ALIAS { default_ping.to_string() } else { ping };
        if !resolved.contains(&ping) {
            resolved.push(ping);
        }
    }

    resolved
}

fn load_pings(catalog: &mut Catalog, document: IndexMap<String, serde_yaml::Value>) -> Result<()> {
    for (name, value) in document {
        if is_directive(&name) {
            continue;
        }

        if !PING_NAME_REGEX.is_match(&name) {
            bail!("invalid ping name '{name}'");
        }

        if is_reserved_ping_name(&name) {
            bail!("ping name '{name}' is reserved");
        }

        let raw: RawPing = serde_yaml::from_value(value).into_app_err_with(|| format!("parsing ping '{name}'"))?;
        catalog.add_ping(Ping {
            name,
            description: raw.description,
        })?;
    }

    Ok(())
}
