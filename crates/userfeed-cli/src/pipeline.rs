//! User feed pipeline with explicit stages.
//!
//! 1. **Ingest**: load the source rows into memory
//! 2. **Partition**: check every record, hand accepted users to a sink and
//!    file violations in the ledger
//! 3. **Output**: write the rejection artifact when anything was rejected,
//!    then the optional JSON run report

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use userfeed_model::{Column, RawRecord, ValidationOptions};
use userfeed_output::{
    AcceptedSink, RejectionArtifact, RunReport, remove_stale_rejections, write_rejections,
    write_run_report,
};
use userfeed_validate::{RecordValidator, ViolationLedger};

use crate::logging::redact_value;

/// Result of the partition stage.
#[derive(Debug, Default)]
pub struct PartitionOutcome {
    pub ledger: ViolationLedger,
    pub record_count: usize,
    pub accepted_count: usize,
}

impl PartitionOutcome {
    /// Distinct records with at least one violation.
    pub fn rejected_count(&self) -> usize {
        self.ledger.rejected_lines().len()
    }
}

/// Where the output stage writes.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Rejection artifact path. Only present after a run that rejected a record.
    pub rejections: PathBuf,
    /// Optional JSON run report path.
    pub report_json: Option<PathBuf>,
}

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub options: ValidationOptions,
    pub output: OutputConfig,
}

/// Result of a full run.
#[derive(Debug)]
pub struct RunOutcome {
    pub source: PathBuf,
    pub partition: PartitionOutcome,
    pub rejection_artifact: Option<RejectionArtifact>,
    pub report: Option<PathBuf>,
}

/// Check each record in input order.
///
/// Accepted users reach `sink` in the order they appear in `records`.
/// Rejected records are filed in the ledger once per violated rule.
pub fn partition<S: AcceptedSink>(
    records: &[RawRecord],
    validator: &RecordValidator,
    mut sink: S,
) -> Result<PartitionOutcome> {
    let mut outcome = PartitionOutcome {
        record_count: records.len(),
        ..PartitionOutcome::default()
    };
    for record in records {
        match validator.check(record, &mut outcome.ledger) {
            Some(user) => {
                trace!(
                    line = record.line,
                    email = %redact_value(&user.email),
                    "record accepted"
                );
                sink.accept(&user)
                    .with_context(|| format!("emit accepted record from line {}", record.line))?;
                outcome.accepted_count += 1;
            }
            None => {
                trace!(
                    line = record.line,
                    email = %redact_value(record.get(Column::Email)),
                    "record filed"
                );
            }
        }
    }
    sink.finish().context("flush accepted records")?;
    Ok(outcome)
}

/// Run ingest, partition and output for one source file.
pub fn run<S: AcceptedSink>(config: &RunConfig, sink: S) -> Result<RunOutcome> {
    let source = config.input.as_path();
    let run_span = info_span!("run", source = %source.display());
    let _run_guard = run_span.enter();

    let ingest_start = Instant::now();
    let records = info_span!("ingest").in_scope(|| {
        userfeed_ingest::read_records(source)
            .with_context(|| format!("read {}", source.display()))
    })?;
    info!(
        record_count = records.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let validator = RecordValidator::new(config.options.clone());
    let partition_start = Instant::now();
    let partitioned =
        info_span!("partition").in_scope(|| partition(&records, &validator, sink))?;
    info!(
        accepted_count = partitioned.accepted_count,
        rejected_count = partitioned.rejected_count(),
        reason_count = partitioned.ledger.len(),
        duration_ms = partition_start.elapsed().as_millis(),
        "partition complete"
    );

    let output_span = info_span!("output");
    let _output_guard = output_span.enter();
    let rejection_artifact =
        write_rejection_artifact(&config.output.rejections, &partitioned.ledger)?;
    let report = match &config.output.report_json {
        Some(path) => {
            let report = RunReport::new(
                source,
                partitioned.record_count,
                partitioned.accepted_count,
                &partitioned.ledger,
                rejection_artifact.as_ref(),
            );
            Some(
                write_run_report(path, &report)
                    .with_context(|| format!("write run report {}", path.display()))?,
            )
        }
        None => None,
    };

    Ok(RunOutcome {
        source: source.to_path_buf(),
        partition: partitioned,
        rejection_artifact,
        report,
    })
}

/// Write the rejection artifact.
///
/// With an empty ledger no artifact is written and any file left at `path`
/// by an earlier run is removed.
pub fn write_rejection_artifact(
    path: &Path,
    ledger: &ViolationLedger,
) -> Result<Option<RejectionArtifact>> {
    if ledger.is_empty() {
        remove_stale_rejections(path)
            .with_context(|| format!("clear rejections {}", path.display()))?;
        info!(path = %path.display(), "no rejections, artifact not written");
        return Ok(None);
    }
    let artifact = write_rejections(path, ledger)
        .with_context(|| format!("write rejections {}", path.display()))?;
    Ok(Some(artifact))
}
