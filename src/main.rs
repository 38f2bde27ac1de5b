use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use revenue_report::config::{AppConfig, Config, LogFormat};
use revenue_report::middleware;
use revenue_report::revenue::RevenueService;
use revenue_report::stripe::StripeClient;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("revenue_report={},actix_web=info", app.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    init_tracing(&config.app);

    tracing::info!("Starting revenue report service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());
    tracing::info!(
        utc_offset_minutes = config.revenue.utc_offset_minutes,
        fee_percentage = %config.revenue.fee_percentage,
        fee_fixed = %config.revenue.fee_fixed,
        exchange_rate = %config.revenue.exchange_rate,
        "Revenue rules loaded"
    );

    let stripe = StripeClient::new(&config.stripe).expect("Failed to create Stripe client");
    let service = RevenueService::from_config(&config.revenue, Arc::new(stripe))
        .expect("Failed to create revenue service");
    let service = web::Data::new(service);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::cors())
            .wrap(TracingLogger::default())
            .app_data(service.clone())
            .app_data(middleware::json_config())
            .app_data(middleware::query_config())
            .configure(revenue_report::configure)
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
