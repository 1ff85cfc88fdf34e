//! User feed outputs: the rejection artifact, accepted-record sinks and the
//! JSON run report.

pub mod error;
pub mod rejection;
pub mod report;
pub mod sink;

pub use error::{OutputError, Result};
pub use rejection::{
    RejectionArtifact, rejection_rows, remove_stale_rejections, write_rejections,
    write_rejections_to,
};
pub use report::{ReasonCount, RunReport, write_run_report};
pub use sink::{AcceptedSink, CollectingSink, JsonLinesSink, TextLineSink};
