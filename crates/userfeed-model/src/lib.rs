//! User feed data model.

pub mod error;
pub mod options;
pub mod record;
pub mod user;
pub mod violation;

pub use error::{ModelError, Result};
pub use options::{EmptyLengthMode, ValidationOptions};
pub use record::{Column, FIELD_COUNT, RawRecord};
pub use user::User;
pub use violation::Violation;
