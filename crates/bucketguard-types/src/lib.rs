//! Stable DTOs and codes used across the bucketguard workspace.
//!
//! This crate is intentionally boring:
//! - the classification emitted per bucket
//! - data types for the emitted audit report
//! - stable string codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod access_block;
pub mod classification;
pub mod explain;
pub mod ids;
pub mod receipt;

pub use access_block::{AccessBlockSummary, PublicAccessBlock};
pub use classification::Classification;
pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use receipt::{AuditData, AuditEntry, AuditReport, ToolMeta, Verdict, SCHEMA_REPORT_V1};
