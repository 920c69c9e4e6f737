use std::sync::Arc;

use bcrypt::BcryptError;

use crate::auth::password::hash_password;
use crate::auth::token::TokenService;
use crate::store::{StudyGroupStore, UserStore};

/// Shared handler state, built once at startup.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub groups: Arc<dyn StudyGroupStore>,
    pub tokens: TokenService,
    pub bcrypt_cost: u32,
    // checked against when the username is unknown so both login failures cost one bcrypt verify
    pub dummy_password_hash: String,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        groups: Arc<dyn StudyGroupStore>,
        tokens: TokenService,
        bcrypt_cost: u32,
    ) -> Result<Self, BcryptError> {
        let dummy_password_hash = hash_password("study-buddy-dummy-password", bcrypt_cost)?;
        Ok(Self {
            users,
            groups,
            tokens,
            bcrypt_cost,
            dummy_password_hash,
        })
    }
}
