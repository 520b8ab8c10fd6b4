use std::collections::HashMap;

use ::config::{Config, Environment, File};
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::logging_config::LoggingConfig;
use super::server_config::ServerConfig;
use super::sheets_config::SpreadsheetConfig;

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "SIGNUP_SHEET";
pub const SERVICE_ACCOUNT_KEY_VAR: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";
pub const SPREADSHEET_ID_VAR: &str = "GOOGLE_SPREADSHEET_ID";
pub const DEFAULT_MAX_BODY_BYTES: i64 = 1024 * 1024;

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Failed to read configuration sources")]
    ReadFailed,
    #[error("Failed to deserialize configuration")]
    DeserializeFailed,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sheets: SpreadsheetConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> error_stack::Result<AppConfig, AppConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_env(&env)
    }

    /// Builds the configuration from defaults, the optional file named by
    /// `CONFIG_PATH`, `SIGNUP_SHEET__SECTION__KEY` variables and finally the
    /// `GOOGLE_*` credential variables, later sources winning.
    pub fn from_env(
        env: &HashMap<String, String>,
    ) -> error_stack::Result<AppConfig, AppConfigError> {
        let config_path = env
            .get(CONFIG_PATH_VAR)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CONFIG_PATH);

        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")
            .and_then(|builder| builder.set_default("server.port", 3000))
            .and_then(|builder| {
                builder.set_default("server.max_body_bytes", DEFAULT_MAX_BODY_BYTES)
            })
            .and_then(|builder| builder.set_default("sheets.range", "Sheet1!A:A"))
            .and_then(|builder| builder.set_default("logging.level", "info"))
            .and_then(|builder| builder.set_default("logging.format", "pretty"))
            .change_context(AppConfigError::ReadFailed)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(Some(env.clone())),
            )
            .set_override_option(
                "sheets.service_account_key",
                env.get(SERVICE_ACCOUNT_KEY_VAR).cloned(),
            )
            .and_then(|builder| {
                builder.set_override_option(
                    "sheets.spreadsheet_id",
                    env.get(SPREADSHEET_ID_VAR).cloned(),
                )
            })
            .change_context(AppConfigError::ReadFailed)?
            .build()
            .change_context(AppConfigError::ReadFailed)
            .attach_printable_lazy(|| format!("Config file: {}", config_path))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(AppConfigError::DeserializeFailed)?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        match AppConfig::deserialize(path_de) {
            Ok(val) => Ok(val),
            Err(e) => {
                let path_str = track
                    .path()
                    .iter()
                    .map(|seg| match seg {
                        Segment::Seq { index } => format!("[{}]", index),
                        Segment::Map { key } => format!(".{}", key),
                        Segment::Enum { variant } => format!("::{}", variant),
                        Segment::Unknown => String::from("<?>"),
                    })
                    .collect::<String>();
                Err(report!(AppConfigError::DeserializeFailed)
                    .attach_printable(format!("{}", e))
                    .attach_printable(format!(
                        "Field path: {}",
                        path_str.trim_start_matches('.')
                    )))
            }
        }
    }
}
