use async_trait::async_trait;
use sqlx::MySqlPool;

use super::{StoreError, StudyGroupStore, UserStore};
use crate::models::{
    group_membership::{GroupMember, GroupMembership},
    study_group::StudyGroup,
    user::{NewUser, User},
};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn create(&self, user: NewUser) -> Result<i32, StoreError> {
        let result = sqlx::query(
            "INSERT INTO Users_ (user_name, user_email, password_hash) VALUES (?, ?, ?)",
        )
        .bind(&user.user_name)
        .bind(&user.user_email)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_id() as i32)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, user_email, password_hash FROM Users_ WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_username(&self, user_name: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, user_email, password_hash FROM Users_ WHERE user_name = ?",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, user_email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, user_email, password_hash FROM Users_ WHERE user_email = ?",
        )
        .bind(user_email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_password(&self, user_id: i32, password_hash: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE Users_ SET password_hash = ? WHERE user_id = ?")
            .bind(password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl StudyGroupStore for MySqlStore {
    async fn list(&self) -> Result<Vec<StudyGroup>, StoreError> {
        let groups = sqlx::query_as::<_, StudyGroup>(
            "SELECT group_id, group_name FROM StudyGroups_ ORDER BY group_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(groups)
    }

    async fn find_by_id(&self, group_id: i32) -> Result<Option<StudyGroup>, StoreError> {
        let group = sqlx::query_as::<_, StudyGroup>(
            "SELECT group_id, group_name FROM StudyGroups_ WHERE group_id = ?",
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(group)
    }

    async fn list_all_members(&self) -> Result<Vec<GroupMember>, StoreError> {
        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT gm.group_id, u.user_id, u.user_name
             FROM GroupMemberships_ gm
             JOIN Users_ u ON gm.user_id = u.user_id
             ORDER BY gm.group_id, u.user_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn list_members(&self, group_id: i32) -> Result<Vec<GroupMember>, StoreError> {
        let members = sqlx::query_as::<_, GroupMember>(
            "SELECT gm.group_id, u.user_id, u.user_name
             FROM GroupMemberships_ gm
             JOIN Users_ u ON gm.user_id = u.user_id
             WHERE gm.group_id = ?
             ORDER BY u.user_id",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    async fn is_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError> {
        let membership = sqlx::query_as::<_, GroupMembership>(
            "SELECT group_id, user_id FROM GroupMemberships_ WHERE group_id = ? AND user_id = ?",
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(membership.is_some())
    }

    async fn add_member(&self, group_id: i32, user_id: i32) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO GroupMemberships_ (group_id, user_id) VALUES (?, ?)")
            .bind(group_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_member(&self, group_id: i32, user_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM GroupMemberships_ WHERE group_id = ? AND user_id = ?")
            .bind(group_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
