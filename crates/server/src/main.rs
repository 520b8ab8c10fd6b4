use actix_web::{web, App, HttpServer};
use signup_sheet_core::adapters::config::app_config::AppConfig;
use signup_sheet_core::adapters::config::logging_config::{LogFormat, LoggingConfig};
use signup_sheet_core::prettyprint::PrettyFormatter;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

mod application_service_factory;
mod http_adapter;

use application_service_factory::ApplicationServiceFactory;
use http_adapter::BodyLimit;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            eprintln!("[CONFIG ERROR] {:?}", report);
            std::process::exit(1);
        }
    };

    setup_tracing(&config.logging)?;
    setup_panic_hook();

    info!("Starting signup-sheet server with {:?}", config.sheets);
    if config.sheets.service_account_key.is_none() {
        error!("GOOGLE_SERVICE_ACCOUNT_KEY is not set, every submission will fail");
    }
    if config.sheets.spreadsheet_id.is_none() {
        error!("GOOGLE_SPREADSHEET_ID is not set, every submission will fail");
    }

    let service = web::Data::from(ApplicationServiceFactory::create(&config));
    let body_limit = BodyLimit(config.server.max_body_bytes);

    let bind_address = (config.server.host.to_string(), config.server.port);
    info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(body_limit)
            .configure(http_adapter::routes)
    })
    .bind(bind_address)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}

fn setup_tracing(config: &LoggingConfig) -> std::io::Result<()> {
    let pretty_layer = (config.format == LogFormat::Pretty).then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(PrettyFormatter::new(true))
            .with_writer(std::io::stdout)
    });

    let json_layer = (config.format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
    });

    let log_file_layer = match &config.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(std::fs::File::create(path.as_ref())?)
                .with_ansi(false),
        ),
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("signup_sheet_server", config.level)
                .with_target("signup_sheet_core", config.level)
                .with_target("actix_server", tracing::Level::INFO),
        )
        .with(pretty_layer)
        .with(json_layer)
        .with(log_file_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
