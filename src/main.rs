use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;
use sqlx::mysql::MySqlPoolOptions;

mod auth;
mod config;
mod error;
mod models;
mod routes;
mod state;
mod store;

use crate::auth::token::TokenService;
use crate::config::Config;
use crate::state::AppState;
use crate::store::mysql::MySqlStore;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let store = Arc::new(MySqlStore::new(pool));
    let state = AppState::new(
        store.clone(),
        store,
        TokenService::new(&config.jwt_secret_key, config.jwt_access_token_ttl),
        config.bcrypt_cost,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let state = web::Data::new(state);

    let cors_origin = config.cors_allowed_origin.clone();
    info!("Server running at http://{}", config.server_address);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::routes::configure_routes)
    })
    .bind(&config.server_address)?
    .run()
    .await
}
