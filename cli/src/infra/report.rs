//! Infrastructure implementation of the `ReportWriter` port.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mcpdoc_common::Report;

use crate::application::ports::ReportWriter;
use crate::infra::fs::write_atomic;

/// Writes the report as pretty JSON to a fixed path, replacing the previous one.
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReportWriter for JsonReportWriter {
    fn persist(&self, report: &Report) -> Result<PathBuf> {
        let mut content = serde_json::to_vec_pretty(report).context("serializing report")?;
        content.push(b'\n');
        write_atomic(&self.path, &content, 0o644)
            .with_context(|| format!("cannot write report {}", self.path.display()))?;
        Ok(self.path.clone())
    }
}
