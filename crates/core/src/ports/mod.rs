pub mod sheet_appender;
pub mod submission_service;

pub use sheet_appender::{AppendError, SheetAppender};
pub use submission_service::{HealthReport, SubmissionError, SubmissionService};
