use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use signup_sheet_core::domain::submission::SubmissionRequest;
use signup_sheet_core::ports::submission_service::SubmissionService;
use tracing::{error, instrument, warn};

pub const MISSING_EMAIL_MESSAGE: &str = "Missing 'email' field in the request body.";
pub const WRITE_FAILED_MESSAGE: &str = "An error occurred while writing to the sheet.";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Upper bound on the submission body, registered as app data. Falls back to
/// [`DEFAULT_BODY_LIMIT`] when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLimit(pub usize);

#[derive(Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit).service(health);
}

fn missing_email() -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorBody {
        error: MISSING_EMAIL_MESSAGE,
    })
}

#[post("/api/spreadsheet")]
#[instrument(skip_all)]
async fn submit(
    req: HttpRequest,
    payload: web::Payload,
    service: web::Data<dyn SubmissionService>,
) -> HttpResponse {
    let BodyLimit(limit) = req
        .app_data::<BodyLimit>()
        .copied()
        .unwrap_or(BodyLimit(DEFAULT_BODY_LIMIT));

    let body = match payload.to_bytes_limited(limit).await {
        Ok(Ok(body)) => body,
        Ok(Err(err)) => {
            warn!("Failed to read submission body: {}", err);
            return missing_email();
        }
        Err(_) => {
            warn!("Rejected submission: body exceeds {} bytes", limit);
            return missing_email();
        }
    };

    let request = match SubmissionRequest::from_json_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!("Rejected submission: {}", err);
            return missing_email();
        }
    };

    match service.submit(request).await {
        Ok(()) => HttpResponse::Ok().json(SuccessBody { success: true }),
        Err(report) => {
            error!("Error writing to Google Sheet: {:?}", report);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: WRITE_FAILED_MESSAGE,
            })
        }
    }
}

#[get("/health")]
async fn health(service: web::Data<dyn SubmissionService>) -> HttpResponse {
    HttpResponse::Ok().json(service.health_check().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use error_stack::report;
    use serde_json::{json, Value};
    use signup_sheet_core::adapters::config::sheets_config::SpreadsheetConfig;
    use signup_sheet_core::adapters::sheets::google_sheets_appender::GoogleSheetsAppender;
    use signup_sheet_core::application::service::SignupSheetApplicationService;
    use signup_sheet_core::domain::sheets::a1_notation::A1Notation;
    use signup_sheet_core::domain::sheets::append_target::AppendTarget;
    use signup_sheet_core::ports::sheet_appender::{AppendError, SheetAppender};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingAppender {
        rows: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl SheetAppender for RecordingAppender {
        async fn append(
            &self,
            _target: &AppendTarget,
            row: &[String],
        ) -> error_stack::Result<(), AppendError> {
            self.rows.lock().await.push(row.to_vec());
            Ok(())
        }
    }

    struct RejectingAppender;

    #[async_trait::async_trait]
    impl SheetAppender for RejectingAppender {
        async fn append(
            &self,
            _target: &AppendTarget,
            _row: &[String],
        ) -> error_stack::Result<(), AppendError> {
            Err(report!(AppendError::RemoteServiceFailure)
                .attach_printable("403 PERMISSION_DENIED: caller does not have permission"))
        }
    }

    fn range() -> A1Notation {
        A1Notation::parse("Sheet1!A:A").unwrap()
    }

    fn service_with(appender: Arc<dyn SheetAppender>) -> Arc<dyn SubmissionService> {
        Arc::new(SignupSheetApplicationService::new(
            appender,
            Some("sheet-id".to_string()),
            range(),
        ))
    }

    async fn post(service: Arc<dyn SubmissionService>, body: &'static str) -> (StatusCode, Value) {
        post_limited(service, None, body).await
    }

    async fn post_limited(
        service: Arc<dyn SubmissionService>,
        limit: Option<BodyLimit>,
        body: impl Into<web::Bytes>,
    ) -> (StatusCode, Value) {
        let mut app = App::new().app_data(web::Data::from(service));
        if let Some(limit) = limit {
            app = app.app_data(limit);
        }
        let app = test::init_service(app.configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/spreadsheet")
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_valid_submission_appends_row() {
        let appender = Arc::new(RecordingAppender::default());

        let (status, body) = post(service_with(appender.clone()), r#"{"email": "a@b.com"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(
            *appender.rows.lock().await,
            vec![vec!["a@b.com".to_string()]]
        );
    }

    #[actix_web::test]
    async fn test_empty_object_is_rejected() {
        let appender = Arc::new(RecordingAppender::default());

        let (status, body) = post(service_with(appender.clone()), "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_EMAIL_MESSAGE }));
        assert!(appender.rows.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_empty_email_is_rejected() {
        let appender = Arc::new(RecordingAppender::default());

        let (status, body) = post(service_with(appender.clone()), r#"{"email": ""}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_EMAIL_MESSAGE }));
        assert!(appender.rows.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_unparseable_body_is_rejected() {
        let appender = Arc::new(RecordingAppender::default());

        let (status, body) = post(service_with(appender.clone()), "email=a@b.com").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_EMAIL_MESSAGE }));
        assert!(appender.rows.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_body_over_actix_default_limit_is_accepted() {
        let appender = Arc::new(RecordingAppender::default());
        let body = json!({ "email": "a@b.com", "note": "x".repeat(300 * 1024) }).to_string();

        let (status, body) = post_limited(service_with(appender.clone()), None, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(
            *appender.rows.lock().await,
            vec![vec!["a@b.com".to_string()]]
        );
    }

    #[actix_web::test]
    async fn test_body_over_configured_limit_is_rejected_as_json() {
        let appender = Arc::new(RecordingAppender::default());
        let body = json!({ "email": "a@b.com", "note": "x".repeat(128) }).to_string();

        let (status, body) =
            post_limited(service_with(appender.clone()), Some(BodyLimit(64)), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_EMAIL_MESSAGE }));
        assert!(appender.rows.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_unset_credentials_return_generic_error() {
        let config = SpreadsheetConfig {
            service_account_key: None,
            spreadsheet_id: Some("sheet-id".into()),
            range: range(),
            api_base_url: None,
        };
        let service = Arc::new(SignupSheetApplicationService::new(
            Arc::new(GoogleSheetsAppender::new(&config)),
            Some("sheet-id".to_string()),
            range(),
        ));

        let (status, body) = post(service, r#"{"email": "a@b.com"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": WRITE_FAILED_MESSAGE }));
    }

    #[actix_web::test]
    async fn test_unset_spreadsheet_id_returns_generic_error() {
        let appender = Arc::new(RecordingAppender::default());
        let service = Arc::new(SignupSheetApplicationService::new(
            appender.clone(),
            None,
            range(),
        ));

        let (status, body) = post(service, r#"{"email": "a@b.com"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": WRITE_FAILED_MESSAGE }));
        assert!(appender.rows.lock().await.is_empty());
    }

    #[actix_web::test]
    async fn test_remote_rejection_returns_generic_error() {
        let (status, body) =
            post(service_with(Arc::new(RejectingAppender)), r#"{"email": "a@b.com"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": WRITE_FAILED_MESSAGE }));
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(service_with(Arc::new(
                    RecordingAppender::default(),
                ))))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({ "status": "ok", "target": "Sheet1!A:A", "spreadsheet_configured": true })
        );
    }
}
