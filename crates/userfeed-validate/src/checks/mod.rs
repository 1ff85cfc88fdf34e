//! Field validators.
//!
//! Each validator is a pure function of the raw field text. None of them
//! trims or normalizes its input.

mod email;
mod length;
mod numeric;
mod presence;

pub use email::email_format;
pub use length::{exceeds_length, max_length};
pub use numeric::parse_float32;
pub use presence::{phone_presence, required_non_empty};
