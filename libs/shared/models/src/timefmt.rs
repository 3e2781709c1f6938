//! Serde support for the `HH:MM` time strings the hosted store keeps in its
//! `time` text columns and inside availability blobs.

use chrono::NaiveTime;
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn parse_hm(s: &str) -> Result<NaiveTime, chrono::format::ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_hm(&s).map_err(serde::de::Error::custom)
}

/// Same format for optional fields (`#[serde(with = "timefmt::option")]`).
pub mod option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_str(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| super::parse_hm(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
