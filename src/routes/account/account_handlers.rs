use actix_web::{web, HttpResponse};
use log::info;

use super::account_models::{LoginRequest, LoginResponse, ResetPasswordRequest, SignupRequest};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, MessageResponse};
use crate::models::user::NewUser;
use crate::state::AppState;
use crate::store::StoreError;

// register user to the store
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let SignupRequest { username, email, password } = req.into_inner();
    let username = username.trim().to_string();
    let email = email.trim().to_string();
    info!("Received request to register user: {}", username);

    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("Username, email and password are required".into()));
    }

    let password_hash = hash_password(&password, state.bcrypt_cost)
        .map_err(|e| AppError::internal("Failed to register user", e))?;

    let new_user = NewUser {
        user_name: username.clone(),
        user_email: email,
        password_hash,
    };

    match state.users.create(new_user).await {
        Ok(user_id) => {
            info!("User {} registered successfully with id {}", username, user_id);
            Ok(HttpResponse::Created().json(MessageResponse {
                message: "User registered successfully".into(),
            }))
        }
        Err(StoreError::UniqueViolation) => {
            info!("Username or email already taken for user: {}", username);
            Err(AppError::Conflict("Username or email already exists".into()))
        }
        Err(e) => Err(AppError::internal("Failed to register user", e)),
    }
}

// login logic; unknown user and wrong password look the same to the client
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let username = &req.username;
    info!("Received login request for user: {}", username);

    let user = state
        .users
        .find_by_username(username)
        .await
        .map_err(|e| AppError::internal("Failed to log in", e))?;

    let user = match user {
        Some(user) => user,
        None => {
            info!("Invalid username: {}", username);
            verify_password(&req.password, &state.dummy_password_hash);
            return Err(invalid_credentials());
        }
    };

    if !verify_password(&req.password, &user.password_hash) {
        info!("Invalid password for user: {}", username);
        return Err(invalid_credentials());
    }

    let access_token = state
        .tokens
        .issue(user.user_id)
        .map_err(|e| AppError::internal("Failed to log in", e))?;

    info!("User {} logged in successfully", username);
    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}

pub async fn reset_password(
    state: web::Data<AppState>,
    req: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let email = &req.email;
    info!("Received password reset request for email: {}", email);

    let user = state
        .users
        .find_by_email(email)
        .await
        .map_err(|e| AppError::internal("Failed to reset password", e))?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let password_hash = hash_password(&req.new_password, state.bcrypt_cost)
        .map_err(|e| AppError::internal("Failed to reset password", e))?;

    state
        .users
        .update_password(user.user_id, &password_hash)
        .await
        .map_err(|e| AppError::internal("Failed to reset password", e))?;

    info!("Password reset for user {}", user.user_name);
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Password reset successfully".into(),
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}
