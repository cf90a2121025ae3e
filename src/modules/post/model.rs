use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::post::schema::{CommentEntity, PostEntity};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostBody {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Post text cannot be empty"))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LikeBody {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentBody {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub comment: String,
}

pub struct InsertPost {
    pub user_id: Uuid,
    pub user_name: String,
    pub text: String,
}

pub struct InsertComment {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub comment_text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentEntity> for CommentResponse {
    fn from(c: CommentEntity) -> Self {
        CommentResponse {
            id: c.id,
            user_id: c.user_id,
            comment_text: c.comment_text,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub text: String,
    pub likes: Vec<String>,
    pub comments: Vec<CommentResponse>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PostResponse {
    pub fn with_comments(post: PostEntity, comments: Vec<CommentResponse>) -> Self {
        PostResponse {
            id: post.id,
            user_id: post.user_id,
            user_name: post.user_name,
            text: post.text,
            likes: post.likes,
            comments,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikesResponse {
    pub likes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}
