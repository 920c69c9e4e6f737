use std::future::{ready, Ready};

use actix_web::{dev::Payload, dev::ServiceRequest, web, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use log::info;

use crate::error::AppError;
use crate::state::AppState;

/// The caller identified by a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

// Validator for `HttpAuthentication::with_fn`. A missing header, another scheme
// or a bare `Bearer` arrives as `None`. On success the caller is stored in the
// request extensions for the `AuthenticatedUser` extractor.
pub async fn validate_token(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let Some(credentials) = credentials else {
        info!("Missing bearer token on {}", req.path());
        return Err((AppError::Unauthorized("Missing authorization token".into()).into(), req));
    };

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        let err = AppError::internal("Internal server error", "AppState is not registered");
        return Err((err.into(), req));
    };

    match state.tokens.verify(credentials.token()) {
        Ok(user_id) => {
            req.extensions_mut().insert(AuthenticatedUser { user_id });
            Ok(req)
        }
        Err(e) => {
            info!("Rejected bearer token on {}: {}", req.path(), e);
            Err((AppError::Unauthorized("Invalid or expired token".into()).into(), req))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .copied()
                .ok_or_else(|| AppError::Unauthorized("Missing authorization token".into())),
        )
    }
}
