//! User feed validation: field validators, the record validator and the
//! violation ledger that partitions records into accepted and rejected.

pub mod checks;
mod ledger;
mod record;

pub use ledger::ViolationLedger;
pub use record::{
    Evaluation, MAX_CITY_LENGTH, MAX_COUNTRY_LENGTH, MAX_EMAIL_LENGTH,
    MAX_IDENTIFY_DOCUMENT_LENGTH, MAX_NAME_LENGTH, RecordValidator, evaluate,
};
