//! Report sinks: where audit entries go once a bucket has been classified.
//!
//! Sinks write to any `io::Write`; choosing stdout or a file is the caller's business.

#![forbid(unsafe_code)]

mod jsonl;
mod tsv;

use bucketguard_types::AuditEntry;
use std::io;

pub use jsonl::JsonLinesSink;
pub use tsv::{AccessBlockColumns, TsvColumns, TsvSink};

/// Downstream collaborator of the evaluator.
pub trait ReportSink {
    /// Record one classified bucket.
    fn record(&mut self, entry: &AuditEntry) -> io::Result<()>;

    /// Flush anything buffered. Called once after the last entry.
    fn finish(&mut self) -> io::Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn record(&mut self, entry: &AuditEntry) -> io::Result<()> {
        (**self).record(entry)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// Sink that keeps every entry in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectSink {
    pub entries: Vec<AuditEntry>,
    pub finished: bool,
}

impl ReportSink for CollectSink {
    fn record(&mut self, entry: &AuditEntry) -> io::Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
