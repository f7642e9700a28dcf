#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for pinggen
//!
//! This library holds all functionality of the pinggen tool, which turns Glean
//! metric and ping definitions into server-side code that records pings as
//! structured log lines.
//!
//! # Module Organization
//!
//! - [`catalog`]: Metric and ping definitions and their YAML loader
//! - [`codegen`]: Type filtering, ping aggregation, validation and emission
//! - [`render`]: Go and JavaScript source generators
//! - [`reports`]: Console and JSON summaries of a generation plan
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod catalog;
#[cfg(not(any(debug_assertions, test)))]
mod catalog;

#[cfg(any(debug_assertions, test))]
pub mod codegen;
#[cfg(not(any(debug_assertions, test)))]
mod codegen;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod render;
#[cfg(not(any(debug_assertions, test)))]
mod render;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
