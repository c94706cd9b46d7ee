use crate::ReportSink;
use bucketguard_types::{AuditEntry, Classification};
use std::io::{self, Write};

const ACCESS_BLOCK_HEADERS: [&str; 4] = [
    "BlockPublicAcls",
    "IgnorePublicAcls",
    "BlockPublicPolicy",
    "RestrictPublicBuckets",
];
const SUMMARY_HEADERS: [&str; 2] = ["PublicAccessBlock", "HasBucketPolicy"];
const ERROR_CELL: &str = "ERROR";

/// Which public access block columns follow `Permission`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessBlockColumns {
    #[default]
    Off,
    /// One column per flag.
    Flags,
    /// `SET / NOT SET / ERROR` plus whether the bucket has a policy at all.
    Summary,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TsvColumns {
    pub access_block: AccessBlockColumns,
}

/// Tab-separated `Bucket Name\tPermission` rows.
///
/// The header is written exactly once, before the first row (or at `finish`
/// when there were no rows), and the sink alone tracks whether that happened.
pub struct TsvSink<W: Write> {
    out: W,
    columns: TsvColumns,
    header_written: bool,
}

impl<W: Write> TsvSink<W> {
    pub fn new(out: W, columns: TsvColumns) -> Self {
        Self {
            out,
            columns,
            header_written: false,
        }
    }

    pub fn header_written(&self) -> bool {
        self.header_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        let mut cols = vec!["Bucket Name", "Permission"];
        match self.columns.access_block {
            AccessBlockColumns::Off => {}
            AccessBlockColumns::Flags => cols.extend(ACCESS_BLOCK_HEADERS),
            AccessBlockColumns::Summary => cols.extend(SUMMARY_HEADERS),
        }
        writeln!(self.out, "{}", cols.join("\t"))?;
        self.header_written = true;
        Ok(())
    }
}

/// `true`/`false`, or `ERROR` when the policy lookup itself failed.
fn has_policy_cell(classification: &Classification) -> String {
    if classification.is_fetch_error() {
        return ERROR_CELL.to_string();
    }
    (*classification != Classification::NoPolicy).to_string()
}

impl<W: Write> ReportSink for TsvSink<W> {
    fn record(&mut self, entry: &AuditEntry) -> io::Result<()> {
        self.write_header()?;

        // Tabs or newlines in provider messages would break the row.
        let permission = entry
            .classification
            .to_string()
            .replace(['\t', '\r', '\n'], " ");
        let mut row = vec![entry.bucket.clone(), permission];
        let summary = entry.public_access_block.as_ref();
        match self.columns.access_block {
            AccessBlockColumns::Off => {}
            AccessBlockColumns::Flags => match summary {
                Some(summary) => row.extend(summary.flag_columns()),
                None => row.extend(std::iter::repeat_n(ERROR_CELL.to_string(), 4)),
            },
            AccessBlockColumns::Summary => {
                row.push(summary.map_or(ERROR_CELL, |s| s.label()).to_string());
                row.push(has_policy_cell(&entry.classification));
            }
        }
        writeln!(self.out, "{}", row.join("\t"))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.write_header()?;
        self.out.flush()
    }
}
