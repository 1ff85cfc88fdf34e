//! Record validation.
//!
//! Every rule runs for every record; a failing rule never stops the rules
//! after it. Rules run in [`Violation`] order, so a record's violations come
//! out in the same order the ledger iterates reasons.

use tracing::debug;
use userfeed_model::{Column, EmptyLengthMode, RawRecord, User, ValidationOptions, Violation};

use crate::checks::{
    email_format, exceeds_length, max_length, parse_float32, phone_presence, required_non_empty,
};
use crate::ledger::ViolationLedger;

pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_IDENTIFY_DOCUMENT_LENGTH: usize = 40;
pub const MAX_CITY_LENGTH: usize = 255;
pub const MAX_COUNTRY_LENGTH: usize = 2;

/// Outcome of running the full rule set over one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    violations: Vec<Violation>,
    latitude: f32,
    longitude: f32,
    is_phone_verified: bool,
}

impl Evaluation {
    /// Violations in rule order. Empty for an accepted record.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }

    /// Parsed latitude, `0.0` when it did not parse.
    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    /// Parsed longitude, `0.0` when it did not parse.
    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    pub fn is_phone_verified(&self) -> bool {
        self.is_phone_verified
    }

    /// Project the evaluated record into a [`User`].
    ///
    /// Returns `None` unless the record incurred zero violations.
    pub fn into_user(self, record: &RawRecord) -> Option<User> {
        if !self.is_accepted() {
            return None;
        }
        Some(User {
            email: record.get(Column::Email).to_string(),
            first_name: record.get(Column::FirstName).to_string(),
            last_name: record.get(Column::LastName).to_string(),
            phone: record.get(Column::Phone).to_string(),
            is_phone_verified: self.is_phone_verified,
            identify_document: record.get(Column::IdentifyDocument).to_string(),
            latitude: self.latitude,
            longitude: self.longitude,
            address1: record.get(Column::Address1).to_string(),
            address2: record.get(Column::Address2).to_string(),
            city: record.get(Column::City).to_string(),
            zip_code: record.get(Column::ZipCode).to_string(),
            state_name: record.get(Column::StateName).to_string(),
            country: record.get(Column::Country).to_string(),
        })
    }
}

/// Run every rule against one record.
pub fn evaluate(record: &RawRecord, options: &ValidationOptions) -> Evaluation {
    let mut rules = RuleRun {
        violations: Vec::new(),
        empty_length_mode: options.empty_length_mode,
    };

    let email = record.get(Column::Email);
    rules.required(email, Violation::EmailRequired);
    rules.length(email, MAX_EMAIL_LENGTH, Violation::EmailLength);
    rules.fail_if(!email_format(email), Violation::EmailFormat);

    let first_name = record.get(Column::FirstName);
    rules.required(first_name, Violation::FirstNameRequired);
    rules.length(first_name, MAX_NAME_LENGTH, Violation::FirstNameLength);

    let last_name = record.get(Column::LastName);
    rules.required(last_name, Violation::LastNameRequired);
    rules.length(last_name, MAX_NAME_LENGTH, Violation::LastNameLength);

    let is_phone_verified = phone_presence(record.get(Column::Phone));

    let document = record.get(Column::IdentifyDocument);
    rules.required(document, Violation::IdentifyDocumentRequired);
    rules.length(
        document,
        MAX_IDENTIFY_DOCUMENT_LENGTH,
        Violation::IdentifyDocumentLength,
    );

    let latitude = record.get(Column::Latitude);
    rules.required(latitude, Violation::LatitudeRequired);
    let latitude = rules.float(latitude, Violation::LatitudeNotFloat);

    let longitude = record.get(Column::Longitude);
    rules.required(longitude, Violation::LongitudeRequired);
    let longitude = rules.float(longitude, Violation::LongitudeNotFloat);

    let city = record.get(Column::City);
    rules.required(city, Violation::CityRequired);
    rules.length(city, MAX_CITY_LENGTH, Violation::CityLength);

    let country = record.get(Column::Country);
    rules.required(country, Violation::CountryRequired);
    rules.length(country, MAX_COUNTRY_LENGTH, Violation::CountryLength);

    Evaluation {
        violations: rules.violations,
        latitude,
        longitude,
        is_phone_verified,
    }
}

struct RuleRun {
    violations: Vec<Violation>,
    empty_length_mode: EmptyLengthMode,
}

impl RuleRun {
    fn fail_if(&mut self, failed: bool, violation: Violation) {
        if failed {
            self.violations.push(violation);
        }
    }

    fn required(&mut self, value: &str, violation: Violation) {
        self.fail_if(!required_non_empty(value), violation);
    }

    fn length(&mut self, value: &str, max: usize, violation: Violation) {
        let failed = match self.empty_length_mode {
            EmptyLengthMode::Report => !max_length(value, max),
            EmptyLengthMode::Ignore => exceeds_length(value, max),
        };
        self.fail_if(failed, violation);
    }

    fn float(&mut self, value: &str, violation: Violation) -> f32 {
        match parse_float32(value) {
            Some(parsed) => parsed,
            None => {
                self.violations.push(violation);
                0.0
            }
        }
    }
}

/// Applies the rule set to records and files violations in a ledger.
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    options: ValidationOptions,
}

impl RecordValidator {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Validate one record.
    ///
    /// Every violation appends a copy of the record to `ledger` under that
    /// reason. Returns the projected user only when nothing was violated.
    pub fn check(&self, record: &RawRecord, ledger: &mut ViolationLedger) -> Option<User> {
        let evaluation = evaluate(record, &self.options);
        if !evaluation.is_accepted() {
            debug!(
                line = record.line,
                violation_count = evaluation.violations().len(),
                violations = ?evaluation.violations(),
                "record rejected"
            );
        }
        for violation in evaluation.violations() {
            ledger.record(*violation, record.clone());
        }
        evaluation.into_user(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: [&str; 13]) -> RawRecord {
        RawRecord::new(1, values.iter().map(|v| (*v).to_string()).collect()).unwrap()
    }

    fn valid() -> [&'static str; 13] {
        [
            "a@b.com", "Jo", "Lee", "", "DOC1", "10.5", "20.5", "", "", "Lima", "", "", "PE",
        ]
    }

    #[test]
    fn valid_record_has_no_violations() {
        let evaluation = evaluate(&record(valid()), &ValidationOptions::default());
        assert!(evaluation.is_accepted());
        assert_eq!(evaluation.latitude(), 10.5);
        assert_eq!(evaluation.longitude(), 20.5);
        assert!(!evaluation.is_phone_verified());
    }

    #[test]
    fn all_empty_record_reports_every_rule() {
        let evaluation = evaluate(&record([""; 13]), &ValidationOptions::default());
        assert_eq!(evaluation.violations(), Violation::ALL.as_slice());
        assert_eq!(evaluation.latitude(), 0.0);
        assert!(evaluation.into_user(&record([""; 13])).is_none());
    }

    #[test]
    fn strict_length_drops_length_reasons_for_empty_values() {
        let evaluation = evaluate(&record([""; 13]), &ValidationOptions::strict_length());
        assert_eq!(
            evaluation.violations(),
            &[
                Violation::EmailRequired,
                Violation::EmailFormat,
                Violation::FirstNameRequired,
                Violation::LastNameRequired,
                Violation::IdentifyDocumentRequired,
                Violation::LatitudeRequired,
                Violation::LatitudeNotFloat,
                Violation::LongitudeRequired,
                Violation::LongitudeNotFloat,
                Violation::CityRequired,
                Violation::CountryRequired,
            ]
        );
    }

    #[test]
    fn strict_length_still_reports_over_length() {
        let mut values = valid();
        values[12] = "PER";
        let evaluation = evaluate(&record(values), &ValidationOptions::strict_length());
        assert_eq!(evaluation.violations(), &[Violation::CountryLength]);
    }

    #[test]
    fn phone_sets_flag_without_violation() {
        let mut values = valid();
        values[3] = "555";
        let user = evaluate(&record(values), &ValidationOptions::default())
            .into_user(&record(values))
            .unwrap();
        assert!(user.is_phone_verified);
        assert_eq!(user.phone, "555");
    }

    #[test]
    fn check_files_every_violation() {
        let mut values = valid();
        values[5] = "abc";
        values[12] = "PER";
        let validator = RecordValidator::default();
        let mut ledger = ViolationLedger::new();

        assert!(validator.check(&record(values), &mut ledger).is_none());
        assert_eq!(
            ledger.counts(),
            vec![
                (Violation::LatitudeNotFloat, 1),
                (Violation::CountryLength, 1)
            ]
        );
    }
}
