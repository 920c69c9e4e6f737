// src/store/mod.rs

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    group_membership::GroupMember,
    study_group::StudyGroup,
    user::{NewUser, User},
};

pub mod mysql;
#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::UniqueViolation,
            _ => StoreError::Database(e),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user and returns its new id. Fails with
    /// `StoreError::UniqueViolation` when the username or email is taken.
    async fn create(&self, user: NewUser) -> Result<i32, StoreError>;
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, user_name: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, user_email: &str) -> Result<Option<User>, StoreError>;
    async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait StudyGroupStore: Send + Sync {
    async fn list(&self) -> Result<Vec<StudyGroup>, StoreError>;
    async fn find_by_id(&self, group_id: i32) -> Result<Option<StudyGroup>, StoreError>;
    /// Members of every group, ordered by group then user id.
    async fn list_all_members(&self) -> Result<Vec<GroupMember>, StoreError>;
    async fn list_members(&self, group_id: i32) -> Result<Vec<GroupMember>, StoreError>;
    async fn is_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError>;
    /// Fails with `StoreError::UniqueViolation` if the pair already exists.
    async fn add_member(&self, group_id: i32, user_id: i32) -> Result<(), StoreError>;
    /// Returns false when there was no membership row to delete.
    async fn remove_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError>;
}
