use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct StudyGroup {
    pub group_id: i32,
    pub group_name: String,
}
