//! Use case orchestration for bucketguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, source,
//! and render layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod check;
mod explain;

pub use audit::{load_config, run_audit, verdict_exit_code, AuditInput, AuditOutput};
pub use check::{describe_check, run_check, CheckOutput};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
