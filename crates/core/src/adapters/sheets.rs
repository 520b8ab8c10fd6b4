pub mod auth;
pub mod credential;
pub mod google_sheets_appender;
pub mod http_client;
pub mod value_range_factory;
