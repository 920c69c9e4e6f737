use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::Duration;

use crate::auth::{password::hash_password, token::TokenService};
use crate::models::{
    group_membership::GroupMember,
    study_group::StudyGroup,
    user::NewUser,
};
use crate::state::AppState;
use crate::store::{memory::MemoryStore, StoreError, StudyGroupStore, UserStore};

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_groups(store.clone(), store)
    }

    /// Reads work, but every membership insert or delete fails at the store.
    pub fn with_failing_memberships() -> Self {
        let store = Arc::new(MemoryStore::new());
        let groups = Arc::new(FailingMembershipStore { inner: store.clone() });
        Self::with_groups(store, groups)
    }

    fn with_groups(store: Arc<MemoryStore>, groups: Arc<dyn StudyGroupStore>) -> Self {
        let state = AppState::new(
            store.clone(),
            groups,
            TokenService::new("test-secret", Duration::minutes(15)),
            4,
        )
        .unwrap();
        TestContext {
            state: web::Data::new(state),
            store,
        }
    }

    /// Inserts a user directly and returns its id and a fresh access token.
    pub async fn seed_user(&self, username: &str, password: &str) -> (i32, String) {
        let user_id = UserStore::create(
            self.store.as_ref(),
            NewUser {
                user_name: username.to_string(),
                user_email: format!("{}@example.com", username),
                password_hash: hash_password(password, 4).unwrap(),
            },
        )
        .await
        .unwrap();
        let token = self.state.tokens.issue(user_id).unwrap();
        (user_id, token)
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

struct FailingMembershipStore {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl StudyGroupStore for FailingMembershipStore {
    async fn list(&self) -> Result<Vec<StudyGroup>, StoreError> {
        self.inner.list().await
    }

    async fn find_by_id(&self, group_id: i32) -> Result<Option<StudyGroup>, StoreError> {
        StudyGroupStore::find_by_id(self.inner.as_ref(), group_id).await
    }

    async fn list_all_members(&self) -> Result<Vec<GroupMember>, StoreError> {
        self.inner.list_all_members().await
    }

    async fn list_members(&self, group_id: i32) -> Result<Vec<GroupMember>, StoreError> {
        self.inner.list_members(group_id).await
    }

    async fn is_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError> {
        self.inner.is_member(group_id, user_id).await
    }

    async fn add_member(&self, _group_id: i32, _user_id: i32) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn remove_member(&self, _group_id: i32, _user_id: i32) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
