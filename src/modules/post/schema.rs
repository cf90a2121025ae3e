use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct PostEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Author name as it was when the post was written
    pub user_name: String,
    pub text: String,
    /// Emails of the identities that liked the post
    pub likes: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CommentEntity {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
