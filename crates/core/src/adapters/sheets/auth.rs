use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use super::credential::ServiceCredential;
use super::http_client::{HttpClient, HttpsConnector};
use crate::ports::sheet_appender::AppendError;

/// Read/write access to spreadsheets, nothing else.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Builds a service account authenticator and fetches a token for
/// [`SPREADSHEETS_SCOPE`] up front, so a rejected credential surfaces as an
/// authentication failure instead of a failed append.
#[instrument(skip(client))]
pub async fn auth(
    credential: ServiceCredential,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, AppendError> {
    let client_email = credential.client_email().to_owned();

    let authenticator =
        oauth2::ServiceAccountAuthenticator::with_client(credential.into_key(), client)
            .build()
            .await
            .change_context(AppendError::AuthenticationFailure)
            .attach_printable("could not create an authenticator")?;

    authenticator
        .token(&[SPREADSHEETS_SCOPE])
        .await
        .change_context(AppendError::AuthenticationFailure)
        .attach_printable_lazy(|| {
            format!("Token request rejected for service account {}", client_email)
        })?;

    Ok(authenticator)
}
