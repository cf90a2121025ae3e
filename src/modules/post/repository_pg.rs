use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::{InsertComment, InsertPost},
        repository::PostRepository,
        schema::{CommentEntity, PostEntity},
    },
};

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let post = sqlx::query_as::<_, PostEntity>(
            "INSERT INTO posts (id, user_id, user_name, text) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(id)
        .bind(post.user_id)
        .bind(&post.user_name)
        .bind(&post.text)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, post_id: &Uuid) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        let posts = sqlx::query_as::<_, PostEntity>(
            "SELECT * FROM posts WHERE user_id = ANY($1) ORDER BY created_at DESC, id DESC",
        )
        .bind(author_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn add_like(
        &self,
        post_id: &Uuid,
        email: &str,
    ) -> Result<Option<Vec<String>>, error::SystemError> {
        let likes = sqlx::query_scalar::<_, Vec<String>>(
            r#"
            UPDATE posts
            SET likes = CASE WHEN $2 = ANY(likes) THEN likes ELSE array_append(likes, $2) END
            WHERE id = $1
            RETURNING likes
            "#,
        )
        .bind(post_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(likes)
    }

    async fn remove_like(
        &self,
        post_id: &Uuid,
        email: &str,
    ) -> Result<Option<Vec<String>>, error::SystemError> {
        let likes = sqlx::query_scalar::<_, Vec<String>>(
            "UPDATE posts SET likes = array_remove(likes, $2) WHERE id = $1 RETURNING likes",
        )
        .bind(post_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(likes)
    }

    async fn add_comment(
        &self,
        comment: &InsertComment,
    ) -> Result<CommentEntity, error::SystemError> {
        let id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let comment = sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO post_comments (id, post_id, user_id, comment_text)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(comment.post_id)
        .bind(comment.user_id)
        .bind(&comment.comment_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comments(
        &self,
        post_ids: &[Uuid],
    ) -> Result<Vec<CommentEntity>, error::SystemError> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }
        let comments = sqlx::query_as::<_, CommentEntity>(
            "SELECT * FROM post_comments WHERE post_id = ANY($1) ORDER BY created_at, id",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    async fn delete(&self, post_id: &Uuid) -> Result<u64, error::SystemError> {
        // post_comments cascade
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
