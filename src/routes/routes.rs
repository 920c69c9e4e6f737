use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use actix_web_httpauth::middleware::HttpAuthentication;
use log::info;

use super::account::account_handlers;
use super::profile::profile_handlers;
use super::study_group::study_group_handlers;
use crate::auth::validate_token;
use crate::error::AppError;

// Registers every endpoint plus the JSON body config.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(|| async { HttpResponse::Ok().body("Hello, this is the Study Buddy API.") }))
        .configure(account_configure)
        .configure(study_group_configure)
        .configure(profile_configure);
}

pub fn account_configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(account_handlers::signup))
        .route("/login", web::post().to(account_handlers::login))
        .route("/reset-password", web::post().to(account_handlers::reset_password));
}

pub fn study_group_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/study-group")
            .wrap(HttpAuthentication::with_fn(validate_token))
            .route("", web::get().to(study_group_handlers::get_study_groups))
            .route("/join", web::post().to(study_group_handlers::join_study_group))
            .route("/leave", web::post().to(study_group_handlers::leave_study_group))
    );
}

pub fn profile_configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/profile")
            .wrap(HttpAuthentication::with_fn(validate_token))
            .route(web::get().to(profile_handlers::get_profile))
    );
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    info!("Rejected JSON body on {}: {}", req.path(), err);
    AppError::BadRequest("Invalid request body".into()).into()
}
