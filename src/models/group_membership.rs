use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GroupMembership {
    pub group_id: i32,
    pub user_id: i32,
}

/// A membership row joined with the member's username.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct GroupMember {
    pub group_id: i32,
    pub user_id: i32,
    pub user_name: String,
}
