use thiserror::Error;

use crate::domain::sheets::append_target::AppendTarget;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendError {
    #[error("Spreadsheet configuration is missing")]
    ConfigurationMissing,
    #[error("Spreadsheet configuration is invalid")]
    ConfigurationInvalid,
    #[error("Failed to authenticate with the spreadsheet service")]
    AuthenticationFailure,
    #[error("Spreadsheet service failed to append the row")]
    RemoteServiceFailure,
}

#[async_trait::async_trait]
pub trait SheetAppender: Send + Sync {
    /// Appends `row` after the last row with data in `target`. Each call adds a
    /// new row, so appending the same values twice yields two rows.
    async fn append(
        &self,
        target: &AppendTarget,
        row: &[String],
    ) -> error_stack::Result<(), AppendError>;
}
