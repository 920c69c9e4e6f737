use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    pub password_hash: String,
}

// Insert payload; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub user_email: String,
    pub password_hash: String,
}
