//! Source code emission for aggregated metrics
//!
//! Each target has a generator that writes one complete source file from a
//! [`RenderContext`]: the generator version string, the ping → type → metrics
//! aggregation, and whether any event metric exists. Generators write with
//! `core::fmt::Write`, so output can be collected in a `String` and compared
//! in tests before anything reaches the file system.
//!
//! Output depends only on the context; the same aggregation always renders to
//! the same bytes.

mod go;
mod javascript;
pub(crate) mod naming;

use crate::Result;
use crate::codegen::{Aggregation, Target};
use core::fmt::Write;

/// Target-specific settings taken from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Package clause of generated Go files.
    pub go_package: String,

    /// Value of the `Type` field of emitted log envelopes.
    pub mozlog_type: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            go_package: "glean".to_string(),
            mozlog_type: "glean-server-event".to_string(),
        }
    }
}

/// Everything a generator needs to produce its output.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'c, 'a> {
    pub version_string: &'c str,
    pub aggregation: &'c Aggregation<'a>,
    pub has_event_metric: bool,
    pub options: &'c RenderOptions,
}

/// Render the output file for `target` into `writer`.
pub fn render<W: Write>(target: Target, context: &RenderContext<'_, '_>, writer: &mut W) -> Result<()> {
    match target {
        Target::Go => go::generate(context, writer),
        Target::Javascript => javascript::generate(context, writer),
    }
}
