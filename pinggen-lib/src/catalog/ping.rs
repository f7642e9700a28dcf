/// An explicitly defined ping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ping {
    pub name: String,
    pub description: String,
}

/// Ping names owned by the Glean SDK which definition files may not redefine.
pub const RESERVED_PING_NAMES: &[&str] = &["baseline", "metrics", "events", "deletion-request", "default", "all-pings"];

/// The ping event metrics are sent in when they don't name one.
pub const DEFAULT_EVENTS_PING: &str = "events";

/// The ping non-event metrics are sent in when they don't name one.
pub const DEFAULT_METRICS_PING: &str = "metrics";

/// Placeholder in `send_in_pings` that resolves to the type's default ping.
pub const DEFAULT_PING_ALIAS: &str = "default";

#[must_use]
pub fn is_reserved_ping_name(name: &str) -> bool {
    RESERVED_PING_NAMES.contains(&name)
}
