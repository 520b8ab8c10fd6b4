use signup_sheet_core::{
    adapters::{
        config::app_config::AppConfig, sheets::google_sheets_appender::GoogleSheetsAppender,
    },
    application::service::SignupSheetApplicationService,
    ports::{sheet_appender::SheetAppender, submission_service::SubmissionService},
};

use std::sync::Arc;

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    pub fn create(config: &AppConfig) -> Arc<dyn SubmissionService> {
        let appender: Arc<dyn SheetAppender> = Arc::new(GoogleSheetsAppender::new(&config.sheets));

        Arc::new(SignupSheetApplicationService::new(
            appender,
            config.sheets.spreadsheet_id.as_deref().map(str::to_owned),
            config.sheets.range.clone(),
        ))
    }
}
