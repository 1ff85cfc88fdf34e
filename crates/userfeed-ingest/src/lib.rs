//! User feed ingestion: loads a header-less, comma-separated source into
//! positional [`RawRecord`](userfeed_model::RawRecord)s.

pub mod error;
pub mod reader;

pub use error::{IngestError, Result};
pub use reader::{
    MAX_SOURCE_FILE_SIZE, check_file_size, check_file_size_with_limit, read_records,
    read_records_from_reader, validate_encoding,
};
