use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body is not a JSON object with a string 'email' field")]
    MalformedBody,
    #[error("Missing 'email' field in the request body.")]
    MissingEmail,
}

/// A validated sign-up submission. The email is only checked for presence:
/// the spreadsheet is the place where people look at it, not this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    email: String,
}

impl SubmissionRequest {
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        Ok(Self { email })
    }

    /// Parses a raw request body.
    ///
    /// ```
    /// use signup_sheet_core::domain::submission::{SubmissionRequest, ValidationError};
    /// let request = SubmissionRequest::from_json_slice(br#"{"email": "a@b.com"}"#).unwrap();
    /// assert_eq!(request.email(), "a@b.com");
    /// assert_eq!(
    ///     SubmissionRequest::from_json_slice(b"{}"),
    ///     Err(ValidationError::MissingEmail)
    /// );
    /// ```
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let mut fields: Map<String, Value> =
            serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;

        match fields.remove("email") {
            Some(Value::String(email)) => Self::new(email),
            None | Some(Value::Null) => Err(ValidationError::MissingEmail),
            Some(_) => Err(ValidationError::MalformedBody),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The single row written to the sheet for this submission.
    pub fn into_row(self) -> Vec<String> {
        vec![self.email]
    }
}
