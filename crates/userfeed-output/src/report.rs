//! Machine-readable run report.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use userfeed_model::Violation;
use userfeed_validate::ViolationLedger;

use crate::error::{OutputError, Result};
use crate::rejection::{RejectionArtifact, ensure_parent_dir};

const REPORT_SCHEMA: &str = "userfeed.run-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub source: PathBuf,
    pub record_count: usize,
    pub accepted_count: usize,
    pub rejected_count: usize,
    pub rejection_rows: usize,
    pub reasons: Vec<ReasonCount>,
    pub rejection_artifact: Option<RejectionArtifact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReasonCount {
    pub violation: Violation,
    pub reason: &'static str,
    pub field: &'static str,
    pub count: usize,
}

impl RunReport {
    pub fn new(
        source: &Path,
        record_count: usize,
        accepted_count: usize,
        ledger: &ViolationLedger,
        artifact: Option<&RejectionArtifact>,
    ) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            source: source.to_path_buf(),
            record_count,
            accepted_count,
            rejected_count: ledger.rejected_lines().len(),
            rejection_rows: ledger.row_count(),
            reasons: ledger
                .counts()
                .into_iter()
                .map(|(violation, count)| ReasonCount {
                    violation,
                    reason: violation.label(),
                    field: violation.field().name(),
                    count,
                })
                .collect(),
            rejection_artifact: artifact.cloned(),
        }
    }
}

pub fn write_run_report(path: &Path, report: &RunReport) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report).map_err(|source| OutputError::Json {
        what: "run report",
        source,
    })?;
    ensure_parent_dir(path)?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "run report written");
    Ok(path.to_path_buf())
}
