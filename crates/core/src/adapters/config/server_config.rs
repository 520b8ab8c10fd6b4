use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: Box<str>,
    #[serde(deserialize_with = "deserialize_number")]
    pub port: u16,
    /// Largest request body read by the submission handler. Anything bigger is
    /// answered as a missing email, never with a bare 413.
    #[serde(deserialize_with = "deserialize_number")]
    pub max_body_bytes: usize,
}

/// Numbers come from defaults and config files as integers, but from the
/// environment as strings. Environment values are kept as strings so that
/// all-digit spreadsheet ids survive, and the numeric fields parse them here.
fn deserialize_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString<T> {
        Number(T),
        String(String),
    }

    match NumberOrString::<T>::deserialize(deserializer)? {
        NumberOrString::Number(number) => Ok(number),
        NumberOrString::String(raw) => raw.trim().parse().map_err(serde::de::Error::custom),
    }
}
