use error_stack::{Report, ResultExt};
use google_sheets4::api::{Scope, ValueRange};
use google_sheets4::Sheets;
use tracing::{debug, instrument};

use super::auth;
use super::credential::ServiceCredential;
use super::http_client;
use super::value_range_factory::ValueRangeFactory;
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::append_target::AppendTarget;
use crate::ports::sheet_appender::{AppendError, SheetAppender};

const USER_ENTERED: &str = "USER_ENTERED";

/// Appends rows through the Google Sheets v4 API.
///
/// Nothing is cached between calls: every append parses the service account
/// key, authenticates and builds a fresh hub.
pub struct GoogleSheetsAppender {
    service_account_key: Option<Box<str>>,
    api_base_url: Option<Box<str>>,
}

impl std::fmt::Debug for GoogleSheetsAppender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsAppender")
            .field(
                "service_account_key",
                &self.service_account_key.as_ref().map(|_| "<redacted>"),
            )
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl GoogleSheetsAppender {
    pub fn new(config: &SpreadsheetConfig) -> Self {
        Self {
            service_account_key: config.service_account_key.clone(),
            api_base_url: config.api_base_url.clone(),
        }
    }
}

/// The hub appends `v4/...` to its base url verbatim.
fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_owned()
    } else {
        format!("{}/", url)
    }
}

fn classify(err: &google_sheets4::Error) -> AppendError {
    match err {
        google_sheets4::Error::MissingToken(_) => AppendError::AuthenticationFailure,
        _ => AppendError::RemoteServiceFailure,
    }
}

#[async_trait::async_trait]
impl SheetAppender for GoogleSheetsAppender {
    #[instrument(skip(self, row))]
    async fn append(
        &self,
        target: &AppendTarget,
        row: &[String],
    ) -> error_stack::Result<(), AppendError> {
        let credential = ServiceCredential::from_json(self.service_account_key.as_deref())?;
        debug!("Authenticating as {}", credential.client_email());

        let client = http_client::http_client();
        let authenticator = auth::auth(credential, client.clone()).await?;
        let mut hub = Sheets::new(client, authenticator);
        if let Some(base_url) = self.api_base_url.as_deref() {
            let base_url = with_trailing_slash(base_url);
            debug!("Using Sheets API at {}", base_url);
            hub.base_url(base_url.clone());
            hub.root_url(base_url);
        }

        let (_, response) = hub
            .spreadsheets()
            .values_append(
                ValueRange::from_single_row(row),
                target.spreadsheet_id(),
                target.range().as_ref(),
            )
            .value_input_option(USER_ENTERED)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(|err| {
                let context = classify(&err);
                Report::new(err).change_context(context)
            })
            .attach_printable_lazy(|| format!("Failed to append to range {}", target.range()))?;

        debug!(
            "Appended to {}",
            response
                .updates
                .and_then(|updates| updates.updated_range)
                .unwrap_or_default()
        );
        Ok(())
    }
}
