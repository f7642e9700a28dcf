//! The generation pipeline
//!
//! A run goes through four steps, all driven from [`emit`]:
//!
//! 1. The type filter ([`classify`]) checks each metric against the allow-list of the
//!    active [`Target`]. Unsupported metrics are skipped with a warning; events whose
//!    extra keys cannot be translated are rejected with an error.
//! 2. The aggregator ([`aggregate`]) groups the remaining metrics into
//!    ping → metric type → metrics, in first-seen order, and notes whether any
//!    event metric exists.
//! 3. The validator ([`validate`]) decides whether the aggregation can be emitted.
//! 4. On success, the emitter renders the aggregation and writes a single file.
//!    Otherwise nothing is written and the reason is reported as a [`Diagnostic`].
//!
//! None of these steps treat an abort as an error. Only I/O and rendering failures
//! are returned as `Err`.

mod aggregator;
mod diagnostic;
mod emitter;
mod target;
mod type_filter;
mod validator;

pub use aggregator::{Aggregation, PingGroup, aggregate};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use emitter::{EmitReport, Emission, Plan, VERSION_STRING, emit, plan};
pub use target::Target;
pub use type_filter::{Classification, classify};
pub use validator::{AbortReason, Verdict, validate};
