//! Header-less CSV reading into positional records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, info};
use userfeed_model::{FIELD_COUNT, ModelError, RawRecord};

use crate::error::{IngestError, Result};

/// Maximum source size the in-memory pass accepts (500 MB).
pub const MAX_SOURCE_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_SOURCE_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject files that start with a UTF-16 byte-order mark.
///
/// A UTF-8 BOM is accepted and stripped while reading.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Load every row of a header-less user feed into memory.
///
/// Runs the size and encoding pre-flight checks first. Any row without
/// exactly one value per column aborts the load.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let records = read_records_from_reader(file, path)?;

    info!(
        path = %path.display(),
        record_count = records.len(),
        "source loaded"
    );
    Ok(records)
}

/// Load records from any reader. `source` is only used in error messages.
///
/// `RawRecord::line` is the physical line a row starts on, counting the
/// blank lines the CSV reader skips.
pub fn read_records_from_reader<R: Read>(mut reader: R, source: &Path) -> Result<Vec<RawRecord>> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| IngestError::FileRead {
            path: source.to_path_buf(),
            source: e,
        })?;
    let lines = LineIndex::new(&data);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| csv_error(source, &lines, e))?;
        let line = row
            .position()
            .map_or(idx as u64 + 1, |position| lines.line_of(position.byte()));

        let mut fields: Vec<String> = row.iter().map(str::to_string).collect();
        if idx == 0
            && let Some(first) = fields.first_mut()
            && first.starts_with('\u{feff}')
        {
            first.drain(..'\u{feff}'.len_utf8());
        }

        let record = RawRecord::new(line, fields).map_err(|e| match e {
            ModelError::FieldCount {
                line,
                expected,
                found,
            } => IngestError::FieldCount {
                path: source.to_path_buf(),
                line,
                expected,
                found,
            },
        })?;
        records.push(record);
    }

    debug!(
        source = %source.display(),
        record_count = records.len(),
        field_count = FIELD_COUNT,
        "rows parsed"
    );
    Ok(records)
}

/// Maps record byte offsets to 1-based physical line numbers.
struct LineIndex<'a> {
    data: &'a [u8],
    newlines: Vec<u64>,
}

impl<'a> LineIndex<'a> {
    fn new(data: &'a [u8]) -> Self {
        let newlines = data
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == b'\n')
            .map(|(offset, _)| offset as u64)
            .collect();
        Self { data, newlines }
    }

    /// Line of the record whose reading started at `byte`.
    ///
    /// The reader reports the offset before any blank lines it skipped, so
    /// leading line terminators are stepped over first.
    fn line_of(&self, byte: u64) -> u64 {
        let start = usize::try_from(byte).unwrap_or(usize::MAX).min(self.data.len());
        let skipped = self.data[start..]
            .iter()
            .take_while(|&&b| b == b'\r' || b == b'\n')
            .count();
        let offset = (start + skipped) as u64;
        self.newlines.partition_point(|&newline| newline < offset) as u64 + 1
    }
}

fn csv_error(path: &Path, lines: &LineIndex, err: csv::Error) -> IngestError {
    let line = err
        .position()
        .map_or(0, |position| lines.line_of(position.byte()));
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}
