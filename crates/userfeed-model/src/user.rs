use serde::{Deserialize, Serialize};

/// An accepted record projected into its structured shape.
///
/// Only built for rows that incurred no violation. Every text field is the
/// source value verbatim; coordinates are parsed and the phone flag is
/// derived. Non-finite coordinates (`NaN`, `inf`) serialize as strings so
/// they survive formats without a representation for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub is_phone_verified: bool,
    pub identify_document: String,
    #[serde(with = "coordinate")]
    pub latitude: f32,
    #[serde(with = "coordinate")]
    pub longitude: f32,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zip_code: String,
    pub state_name: String,
    pub country: String,
}

impl User {
    /// `email first_name last_name`, the plain-text hand-off line.
    pub fn summary_line(&self) -> String {
        format!("{} {} {}", self.email, self.first_name, self.last_name)
    }
}

mod coordinate {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f32(*value)
        } else {
            serializer.collect_str(value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f32),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid coordinate {text:?}"))),
        }
    }
}
