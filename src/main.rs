use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskboard::auth::{AuthMiddleware, TokenService};
use taskboard::config::Config;
use taskboard::routes;
use taskboard::store::{self, TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Schema is created up front, before the server binds.
    store::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    let token_service = TokenService::new(
        &config.jwt_secret,
        chrono::Duration::seconds(config.token_ttl_secs),
    );
    let user_store = UserStore::new(pool.clone());
    let task_store = TaskStore::new(pool);

    log::info!("Starting taskboard server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(user_store.clone()))
            .app_data(web::Data::new(task_store.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
