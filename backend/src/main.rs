use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use bakery_api::{api, config::AppConfig, db};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // DB Pool initialization
    let pool = match db::init_pool(&config) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting Bakery GET API at http://{}:{} (database: {})",
        config.host,
        config.port,
        config.database_url
    );

    let bind_addr = config.bind_addr();
    let config = web::Data::new(config);
    let pool = web::Data::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(pool.clone())
            .app_data(config.clone())
            .configure(api::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
