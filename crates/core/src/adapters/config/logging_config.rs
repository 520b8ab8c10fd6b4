use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoggingConfig {
    #[serde(deserialize_with = "deserialize_level")]
    pub level: tracing::Level,
    pub format: LogFormat,
    /// Also write plain-text logs to this file when set.
    pub file: Option<Box<str>>,
}

fn deserialize_level<'de, D>(deserializer: D) -> Result<tracing::Level, D::Error>
where
    D: Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    level
        .parse::<tracing::Level>()
        .map_err(|_| serde::de::Error::custom(format!("unknown log level '{}'", level)))
}
