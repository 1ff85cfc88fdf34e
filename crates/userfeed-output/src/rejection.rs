//! Rejection artifact.
//!
//! One CSV row per (reason, record) pair in the ledger. Each row is a copy of
//! the source row whose email value is prefixed with the reason text, so a
//! record that failed two rules appears twice, each time with a single
//! prefix.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use userfeed_validate::ViolationLedger;

use crate::error::{OutputError, Result};

/// A rejection artifact that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectionArtifact {
    pub path: PathBuf,
    /// Number of rows written.
    pub rows: usize,
    /// Hex SHA-256 of the file contents.
    pub sha256: String,
}

/// Rows of the rejection artifact: reasons in rule order, records in the
/// order they were filed under each reason.
pub fn rejection_rows(ledger: &ViolationLedger) -> impl Iterator<Item = Vec<String>> + '_ {
    ledger.iter().flat_map(|(violation, records)| {
        records
            .iter()
            .map(move |record| record.with_prefixed_email(violation.reason()))
    })
}

/// Encode the ledger as CSV into `writer`. Returns the number of rows.
pub fn write_rejections_to<W: Write>(writer: W, ledger: &ViolationLedger) -> csv::Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0usize;
    for row in rejection_rows(ledger) {
        writer.write_record(&row)?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

/// Write the rejection artifact to `path`, replacing any existing file.
///
/// Callers only invoke this for a non-empty ledger.
pub fn write_rejections(path: &Path, ledger: &ViolationLedger) -> Result<RejectionArtifact> {
    let mut buffer = Vec::new();
    let rows = write_rejections_to(&mut buffer, ledger)
        .map_err(|source| OutputError::Csv { source })?;

    ensure_parent_dir(path)?;
    let mut file = fs::File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&buffer)
        .and_then(|()| file.sync_all())
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    let sha256 = hex::encode(Sha256::digest(&buffer));
    debug!(path = %path.display(), bytes = buffer.len(), sha256 = %sha256, "rejections flushed");
    info!(
        path = %path.display(),
        rows,
        reason_count = ledger.len(),
        "rejection artifact written"
    );

    Ok(RejectionArtifact {
        path: path.to_path_buf(),
        rows,
        sha256,
    })
}

/// Delete a rejection artifact left by an earlier run.
///
/// Returns `true` when a file was removed. A missing file is not an error.
pub fn remove_stale_rejections(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "stale rejection artifact removed");
            Ok(true)
        }
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(OutputError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Ensure a parent directory exists for a file path.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
