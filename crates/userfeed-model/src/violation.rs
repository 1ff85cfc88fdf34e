//! Validation failure reasons.
//!
//! Each variant is one rule of the record validator. Variant order is rule
//! order, which also fixes the order reasons are reported in.

use serde::{Deserialize, Serialize};

use crate::record::Column;

/// A named reason a record fails one validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    EmailRequired,
    EmailLength,
    EmailFormat,
    FirstNameRequired,
    FirstNameLength,
    LastNameRequired,
    LastNameLength,
    IdentifyDocumentRequired,
    IdentifyDocumentLength,
    LatitudeRequired,
    LatitudeNotFloat,
    LongitudeRequired,
    LongitudeNotFloat,
    CityRequired,
    CityLength,
    CountryRequired,
    CountryLength,
}

impl Violation {
    /// Every reason in rule order.
    pub const ALL: [Violation; 17] = [
        Violation::EmailRequired,
        Violation::EmailLength,
        Violation::EmailFormat,
        Violation::FirstNameRequired,
        Violation::FirstNameLength,
        Violation::LastNameRequired,
        Violation::LastNameLength,
        Violation::IdentifyDocumentRequired,
        Violation::IdentifyDocumentLength,
        Violation::LatitudeRequired,
        Violation::LatitudeNotFloat,
        Violation::LongitudeRequired,
        Violation::LongitudeNotFloat,
        Violation::CityRequired,
        Violation::CityLength,
        Violation::CountryRequired,
        Violation::CountryLength,
    ];

    /// Reason text exactly as written in front of the email value of a
    /// rejected row, separator included.
    pub fn reason(self) -> &'static str {
        match self {
            Violation::EmailRequired => "email is required: ",
            Violation::EmailLength => "length email error: ",
            Violation::EmailFormat => "incorrect format email: ",
            Violation::FirstNameRequired => "first name is required: ",
            Violation::FirstNameLength => "first name length error: ",
            Violation::LastNameRequired => "last name is required: ",
            Violation::LastNameLength => "last name length error: ",
            Violation::IdentifyDocumentRequired => "identify document is required: ",
            Violation::IdentifyDocumentLength => "error identity document length: ",
            Violation::LatitudeRequired => "latitude is required: ",
            Violation::LatitudeNotFloat => "error in latitude is not a float number: ",
            Violation::LongitudeRequired => "longitude is required: ",
            Violation::LongitudeNotFloat => "error in longitude is not a float number: ",
            Violation::CityRequired => "city is required: ",
            Violation::CityLength => "error city length: ",
            Violation::CountryRequired => "country is required: ",
            Violation::CountryLength => "country length error : ",
        }
    }

    /// Reason text without the trailing separator.
    pub fn label(self) -> &'static str {
        self.reason().trim_end_matches([':', ' '])
    }

    /// Column the rule inspects.
    pub fn field(self) -> Column {
        match self {
            Violation::EmailRequired | Violation::EmailLength | Violation::EmailFormat => {
                Column::Email
            }
            Violation::FirstNameRequired | Violation::FirstNameLength => Column::FirstName,
            Violation::LastNameRequired | Violation::LastNameLength => Column::LastName,
            Violation::IdentifyDocumentRequired | Violation::IdentifyDocumentLength => {
                Column::IdentifyDocument
            }
            Violation::LatitudeRequired | Violation::LatitudeNotFloat => Column::Latitude,
            Violation::LongitudeRequired | Violation::LongitudeNotFloat => Column::Longitude,
            Violation::CityRequired | Violation::CityLength => Column::City,
            Violation::CountryRequired | Violation::CountryLength => Column::Country,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
