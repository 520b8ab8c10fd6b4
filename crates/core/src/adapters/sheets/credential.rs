use error_stack::{report, ResultExt};
use google_sheets4::oauth2::ServiceAccountKey;
use serde_json::Value;

use crate::ports::sheet_appender::AppendError;

/// A parsed service account key. Built from the raw JSON on every append and
/// dropped afterwards.
#[derive(Clone)]
pub struct ServiceCredential {
    key: ServiceAccountKey,
}

impl std::fmt::Debug for ServiceCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredential")
            .field("client_email", &self.key.client_email)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl ServiceCredential {
    pub fn from_json(raw: Option<&str>) -> error_stack::Result<Self, AppendError> {
        let raw = raw.filter(|raw| !raw.trim().is_empty()).ok_or_else(|| {
            report!(AppendError::ConfigurationMissing).attach_printable(
                "Google service account credentials are not set (GOOGLE_SERVICE_ACCOUNT_KEY)",
            )
        })?;

        let value: Value = serde_json::from_str(raw)
            .change_context(AppendError::ConfigurationInvalid)
            .attach_printable("Service account credentials are not valid JSON")?;

        let has_private_key = value
            .get("private_key")
            .and_then(Value::as_str)
            .is_some_and(|key| !key.is_empty());
        if !has_private_key {
            return Err(report!(AppendError::ConfigurationInvalid))
                .attach_printable("Invalid service account credentials: missing private_key");
        }

        let key: ServiceAccountKey = serde_json::from_value(value)
            .change_context(AppendError::ConfigurationInvalid)
            .attach_printable("Service account credentials are missing identity fields")?;

        Ok(Self { key })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub fn into_key(self) -> ServiceAccountKey {
        self.key
    }
}
