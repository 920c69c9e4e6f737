// In-memory store used by the handler tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, StudyGroupStore, UserStore};
use crate::models::{
    group_membership::{GroupMember, GroupMembership},
    study_group::StudyGroup,
    user::{NewUser, User},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    groups: Vec<StudyGroup>,
    memberships: Vec<GroupMembership>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_group(&self, group_name: &str) -> i32 {
        let mut tables = self.tables.write().await;
        let group_id = tables.groups.len() as i32 + 1;
        tables.groups.push(StudyGroup {
            group_id,
            group_name: group_name.to_string(),
        });
        group_id
    }

    pub async fn membership_count(&self, group_id: i32, user_id: i32) -> usize {
        let tables = self.tables.read().await;
        tables
            .memberships
            .iter()
            .filter(|m| m.group_id == group_id && m.user_id == user_id)
            .count()
    }

    fn members_of(tables: &Tables, group_id: Option<i32>) -> Vec<GroupMember> {
        let mut members: Vec<GroupMember> = tables
            .memberships
            .iter()
            .filter(|m| group_id.map_or(true, |id| m.group_id == id))
            .filter_map(|m| {
                tables.users.iter().find(|u| u.user_id == m.user_id).map(|u| GroupMember {
                    group_id: m.group_id,
                    user_id: u.user_id,
                    user_name: u.user_name.clone(),
                })
            })
            .collect();
        members.sort_by_key(|m| (m.group_id, m.user_id));
        members
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<i32, StoreError> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .iter()
            .any(|u| u.user_name == user.user_name || u.user_email == user.user_email);
        if taken {
            return Err(StoreError::UniqueViolation);
        }
        let user_id = tables.users.len() as i32 + 1;
        tables.users.push(User {
            user_id,
            user_name: user.user_name,
            user_email: user.user_email,
            password_hash: user.password_hash,
        });
        Ok(user_id)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_username(&self, user_name: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_name == user_name).cloned())
    }

    async fn find_by_email(&self, user_email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.user_email == user_email).cloned())
    }

    async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.users.iter_mut().find(|u| u.user_id == user_id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}

#[async_trait]
impl StudyGroupStore for MemoryStore {
    async fn list(&self) -> Result<Vec<StudyGroup>, StoreError> {
        Ok(self.tables.read().await.groups.clone())
    }

    async fn find_by_id(&self, group_id: i32) -> Result<Option<StudyGroup>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.groups.iter().find(|g| g.group_id == group_id).cloned())
    }

    async fn list_all_members(&self) -> Result<Vec<GroupMember>, StoreError> {
        let tables = self.tables.read().await;
        Ok(Self::members_of(&tables, None))
    }

    async fn list_members(&self, group_id: i32) -> Result<Vec<GroupMember>, StoreError> {
        let tables = self.tables.read().await;
        Ok(Self::members_of(&tables, Some(group_id)))
    }

    async fn is_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .memberships
            .iter()
            .any(|m| m.group_id == group_id && m.user_id == user_id))
    }

    async fn add_member(&self, group_id: i32, user_id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let membership = GroupMembership { group_id, user_id };
        if tables.memberships.contains(&membership) {
            return Err(StoreError::UniqueViolation);
        }
        tables.memberships.push(membership);
        Ok(())
    }

    async fn remove_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.memberships.len();
        tables
            .memberships
            .retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        Ok(tables.memberships.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn rejects_duplicate_username_and_membership() {
        let store = MemoryStore::new();
        let new_user = NewUser {
            user_name: "alice".into(),
            user_email: "a@x.com".into(),
            password_hash: "hash".into(),
        };
        let user_id = UserStore::create(&store, new_user.clone()).await.unwrap();
        assert!(matches!(
            UserStore::create(&store, new_user).await,
            Err(StoreError::UniqueViolation)
        ));

        let group_id = store.add_group("Algebra").await;
        store.add_member(group_id, user_id).await.unwrap();
        assert!(matches!(
            store.add_member(group_id, user_id).await,
            Err(StoreError::UniqueViolation)
        ));
        assert_eq!(store.membership_count(group_id, user_id).await, 1);

        assert!(store.remove_member(group_id, user_id).await.unwrap());
        assert!(!store.remove_member(group_id, user_id).await.unwrap());
    }
}
