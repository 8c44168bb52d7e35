use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use pushkind_storefront::config::ServerConfig;
use pushkind_storefront::repository::RestRepository;
use pushkind_storefront::repository::client::StoreClient;
use pushkind_storefront::routes::configure;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let secret_key = match &config.secret {
        Some(key) => match Key::try_from(key.as_bytes()) {
            Ok(key) => key,
            Err(e) => {
                log::error!("SECRET_KEY must be at least 64 bytes: {e}");
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("SECRET_KEY not set, admin sessions end on restart");
            Key::generate()
        }
    };

    let repo = RestRepository::new(StoreClient::new(&config.store));
    let admin_config = config.admin.clone();
    let domain = config.domain.clone();

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(domain.as_ref().map(|domain| format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(admin_config.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
