//! Summaries of a generation plan
//!
//! The `validate` command runs the full pipeline without writing anything and
//! reports what would be generated, either as colored console text or as JSON
//! for tooling. Both generators take a [`Plan`](crate::codegen::Plan) and write
//! through `core::fmt::Write`.
//!
//! Diagnostics are reported by every command through
//! [`generate_diagnostics`], one line each, prefixed by a severity marker.

mod console;
mod json;

pub use console::generate as generate_console;
pub use console::generate_diagnostics;
pub use json::generate as generate_json;
