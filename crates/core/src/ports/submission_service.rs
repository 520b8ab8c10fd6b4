use serde::Serialize;
use thiserror::Error;

use crate::domain::submission::SubmissionRequest;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Failed to write submission to the sheet")]
    WriteFailed,
}

/// Body of `GET /health`. Built from configuration only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub target: String,
    pub spreadsheet_configured: bool,
}

#[async_trait::async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(&self, request: SubmissionRequest)
        -> error_stack::Result<(), SubmissionError>;

    async fn health_check(&self) -> HealthReport;
}
