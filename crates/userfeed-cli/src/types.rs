use std::path::PathBuf;

use userfeed_cli::pipeline::RunOutcome;
use userfeed_model::Violation;

#[derive(Debug)]
pub struct RunResult {
    pub source: PathBuf,
    pub rejections: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub record_count: usize,
    pub accepted_count: usize,
    pub rejected_count: usize,
    pub rejection_rows: usize,
    pub reasons: Vec<ReasonSummary>,
}

#[derive(Debug)]
pub struct ReasonSummary {
    pub violation: Violation,
    pub records: usize,
}

impl RunResult {
    pub fn has_rejections(&self) -> bool {
        self.rejected_count > 0
    }
}

impl From<RunOutcome> for RunResult {
    fn from(outcome: RunOutcome) -> Self {
        let ledger = &outcome.partition.ledger;
        Self {
            rejections: outcome.rejection_artifact.map(|artifact| artifact.path),
            report: outcome.report,
            record_count: outcome.partition.record_count,
            accepted_count: outcome.partition.accepted_count,
            rejected_count: outcome.partition.rejected_count(),
            rejection_rows: ledger.row_count(),
            reasons: ledger
                .counts()
                .into_iter()
                .map(|(violation, records)| ReasonSummary { violation, records })
                .collect(),
            source: outcome.source,
        }
    }
}
