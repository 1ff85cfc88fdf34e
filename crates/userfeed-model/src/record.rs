//! Positional source rows.
//!
//! A feed row is header-less: the meaning of each value comes from its
//! position. [`Column`] names those positions and [`RawRecord`] guarantees
//! that every row carries exactly one value per column, so field access can
//! never go out of bounds.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Number of positional fields in a source row.
pub const FIELD_COUNT: usize = 13;

/// Positional columns of the user feed, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Email,
    FirstName,
    LastName,
    Phone,
    IdentifyDocument,
    Latitude,
    Longitude,
    Address1,
    Address2,
    City,
    ZipCode,
    StateName,
    Country,
}

impl Column {
    /// All columns in positional order.
    pub const ALL: [Column; FIELD_COUNT] = [
        Column::Email,
        Column::FirstName,
        Column::LastName,
        Column::Phone,
        Column::IdentifyDocument,
        Column::Latitude,
        Column::Longitude,
        Column::Address1,
        Column::Address2,
        Column::City,
        Column::ZipCode,
        Column::StateName,
        Column::Country,
    ];

    /// Zero-based position of the column in a source row.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as used in documentation and logs.
    pub fn name(self) -> &'static str {
        match self {
            Column::Email => "email",
            Column::FirstName => "first_name",
            Column::LastName => "last_name",
            Column::Phone => "phone",
            Column::IdentifyDocument => "identify_document",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::Address1 => "address1",
            Column::Address2 => "address2",
            Column::City => "city",
            Column::ZipCode => "zip_code",
            Column::StateName => "state_name",
            Column::Country => "country",
        }
    }
}

/// One unvalidated source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based row number in the source.
    pub line: u64,
    fields: [String; FIELD_COUNT],
}

impl RawRecord {
    /// Build a record from the values of one source row.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::FieldCount`] when the row does not have exactly
    /// [`FIELD_COUNT`] values.
    pub fn new(line: u64, fields: Vec<String>) -> Result<Self> {
        let fields: [String; FIELD_COUNT] =
            fields
                .try_into()
                .map_err(|rejected: Vec<String>| ModelError::FieldCount {
                    line,
                    expected: FIELD_COUNT,
                    found: rejected.len(),
                })?;
        Ok(Self { line, fields })
    }

    /// Value of a column, verbatim.
    pub fn get(&self, column: Column) -> &str {
        &self.fields[column.index()]
    }

    /// All values in positional order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// A fresh copy of the row with `prefix` prepended to the email value.
    ///
    /// The record itself is never modified, so a record listed under several
    /// reasons yields rows that each carry exactly one prefix.
    pub fn with_prefixed_email(&self, prefix: &str) -> Vec<String> {
        let mut row = self.fields.to_vec();
        row[Column::Email.index()] = format!("{prefix}{}", self.get(Column::Email));
        row
    }
}
