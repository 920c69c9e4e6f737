use actix_web::{web, HttpResponse};
use log::info;

use super::profile_models::ProfileResponse;
use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_profile(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    info!("Received profile request from user {}", caller.user_id);

    // the account may have disappeared since the token was issued
    let user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        username: user.user_name,
        email: user.user_email,
    }))
}
