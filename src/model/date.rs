//! Hire date codec
//!
//! Dates travel as `MM/dd/yyyy` text both on disk and on the wire.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{Result, RosterError};

/// chrono format string for `MM/dd/yyyy`
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a `MM/dd/yyyy` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| RosterError::InvalidDate(text.to_string()))
}

/// Render a date as `MM/dd/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `#[serde(with = "...")]` adapter for `NaiveDate` fields
pub(crate) mod mmddyyyy {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date(&text).map_err(serde::de::Error::custom)
    }
}
