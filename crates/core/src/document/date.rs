//! Publication date handling.
//!
//! The content API emits timestamps as `2021-03-25T19:25:28+0000`, which is
//! not valid RFC 3339 (the offset has no colon). Both forms are accepted on
//! the way in; the API form is used on the way out.

use chrono::{DateTime, Utc};
use thiserror::Error;

const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid publication date: {0}")]
pub struct DateParseError(pub String);

/// Parse a publication timestamp in either the API form or RFC 3339.
pub fn parse_publication_date(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, API_FORMAT))
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| DateParseError(raw.to_string()))
}

/// Format a timestamp the way the content API does.
pub fn format_publication_date(date: &DateTime<Utc>) -> String {
    date.format(API_FORMAT).to_string()
}

/// Serde adapter for nullable publication dates.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_some(&super::format_publication_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_publication_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
