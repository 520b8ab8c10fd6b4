pub mod sheets;
pub mod submission;

// Re-export commonly used types
pub use sheets::append_target::AppendTarget;
pub use submission::{SubmissionRequest, ValidationError};
