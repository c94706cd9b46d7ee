use crate::ReportSink;
use bucketguard_types::AuditEntry;
use std::io::{self, Write};

/// One JSON object per audited bucket.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn record(&mut self, entry: &AuditEntry) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketguard_types::Classification;
    use serde_json::Value;

    #[test]
    fn writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        for (bucket, classification) in [
            ("a", Classification::PubliclyReadable),
            ("b", Classification::FetchError("Access Denied".into())),
        ] {
            sink.record(&AuditEntry {
                bucket: bucket.to_string(),
                classification,
                matched_statement: Some(0).filter(|_| bucket == "a"),
                public_access_block: None,
                allowed: false,
                fingerprint: "f".to_string(),
            })
            .expect("record");
        }
        sink.finish().expect("finish");

        let text = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["classification"]["status"], "publicly_readable");
        assert_eq!(lines[0]["matched_statement"], 0);
        assert_eq!(lines[1]["classification"]["message"], "Access Denied");
        assert!(lines[1].get("matched_statement").is_none());
    }
}
