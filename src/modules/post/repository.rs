use uuid::Uuid;

use crate::api::error;
use crate::modules::post::model::{InsertComment, InsertPost};
use crate::modules::post::schema::{CommentEntity, PostEntity};

#[async_trait::async_trait]
pub trait PostRepository {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError>;

    async fn find_by_id(&self, post_id: &Uuid) -> Result<Option<PostEntity>, error::SystemError>;

    /// Posts written by any of `author_ids`, newest first.
    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<Vec<PostEntity>, error::SystemError>;

    /// Set-union insert of `email` into the likes. `None` when the post is gone.
    async fn add_like(
        &self,
        post_id: &Uuid,
        email: &str,
    ) -> Result<Option<Vec<String>>, error::SystemError>;

    async fn remove_like(
        &self,
        post_id: &Uuid,
        email: &str,
    ) -> Result<Option<Vec<String>>, error::SystemError>;

    async fn add_comment(
        &self,
        comment: &InsertComment,
    ) -> Result<CommentEntity, error::SystemError>;

    /// Comments on any of `post_ids`, oldest first.
    async fn find_comments(
        &self,
        post_ids: &[Uuid],
    ) -> Result<Vec<CommentEntity>, error::SystemError>;

    /// Comments go with the post. Returns rows deleted.
    async fn delete(&self, post_id: &Uuid) -> Result<u64, error::SystemError>;
}
