//! Pure policy evaluation (no IO).
//!
//! Input: a policy outcome fetched elsewhere, plus the bucket it belongs to.
//! Output: a classification per bucket, and a verdict over a whole audit.

#![forbid(unsafe_code)]

pub mod access_block;
pub mod model;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

pub use access_block::summarize_access_block;
pub use engine::{evaluate, evaluate_document, matching_statement, statement_grants_public_read};
pub use fingerprint::fingerprint_for_entry;
pub use report::{assess, summarize, Allowlist};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;
