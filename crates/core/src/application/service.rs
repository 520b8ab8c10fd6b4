use crate::domain::sheets::a1_notation::A1Notation;
use crate::domain::sheets::append_target::AppendTarget;
use crate::domain::submission::SubmissionRequest;
use crate::ports::sheet_appender::{AppendError, SheetAppender};
use crate::ports::submission_service::{HealthReport, SubmissionError, SubmissionService};
use error_stack::{report, ResultExt};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct SignupSheetApplicationService {
    appender: Arc<dyn SheetAppender>,
    spreadsheet_id: Option<String>,
    range: A1Notation,
}

impl std::fmt::Debug for SignupSheetApplicationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupSheetApplicationService")
            .field("appender", &"<SheetAppender>")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("range", &self.range)
            .finish()
    }
}

impl SignupSheetApplicationService {
    pub fn new(
        appender: Arc<dyn SheetAppender>,
        spreadsheet_id: Option<String>,
        range: A1Notation,
    ) -> Self {
        Self {
            appender,
            spreadsheet_id: spreadsheet_id.filter(|id| !id.trim().is_empty()),
            range,
        }
    }

    fn target(&self) -> error_stack::Result<AppendTarget, AppendError> {
        let spreadsheet_id = self.spreadsheet_id.as_deref().ok_or_else(|| {
            report!(AppendError::ConfigurationMissing)
                .attach_printable("Spreadsheet id is not set (GOOGLE_SPREADSHEET_ID)")
        })?;

        Ok(AppendTarget::new(spreadsheet_id, self.range.clone()))
    }
}

#[async_trait::async_trait]
impl SubmissionService for SignupSheetApplicationService {
    #[instrument(skip(self, request))]
    async fn submit(
        &self,
        request: SubmissionRequest,
    ) -> error_stack::Result<(), SubmissionError> {
        let target = self
            .target()
            .change_context(SubmissionError::WriteFailed)?;

        self.appender
            .append(&target, &request.into_row())
            .await
            .change_context(SubmissionError::WriteFailed)?;

        info!("Submission appended to {}", target.range());
        Ok(())
    }

    async fn health_check(&self) -> HealthReport {
        HealthReport {
            status: "ok",
            target: self.range.to_string(),
            spreadsheet_configured: self.spreadsheet_id.is_some(),
        }
    }
}
