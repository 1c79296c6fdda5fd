use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use agencyhub_backend::auth::middleware::JwtSecret;
use agencyhub_backend::cache::StatsCache;
use agencyhub_backend::config::AppConfig;
use agencyhub_backend::handlers;
use agencyhub_backend::notify::Notifier;
use agencyhub_backend::store::Store;
use dotenv::dotenv;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Storage backend: {}", config.backend.as_str());

    // One backend, selected at boot; migrations and catalog seeding run
    // inside connect.
    let store = Store::connect(&config)
        .await
        .expect("Failed to connect storage backend");
    let store_data = web::Data::new(store);

    let stats_cache = web::Data::new(StatsCache::new(Duration::from_secs(
        config.dashboard_cache_ttl_secs,
    )));
    let notifier = web::Data::new(Notifier::new(config.order_webhook_url.clone()));
    let jwt_secret = web::Data::new(JwtSecret(config.jwt_secret.clone()));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(store_data.clone())
            .app_data(stats_cache.clone())
            .app_data(notifier.clone())
            .app_data(jwt_secret.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
