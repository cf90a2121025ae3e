/// Post Service
///
/// Text posts with likes and comments, and the feed that merges a user's own
/// posts with their friends'.
use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::api::error;
use crate::modules::post::model::{CommentResponse, InsertComment, InsertPost, PostResponse};
use crate::modules::post::repository::PostRepository;
use crate::modules::post::schema::PostEntity;
use crate::modules::user::{repository::UserRepository, schema::UserEntity};

#[derive(Clone)]
pub struct PostService<P, U>
where
    P: PostRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> PostService<P, U>
where
    P: PostRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        PostService { post_repo, user_repo }
    }

    async fn find_user(&self, email: &str) -> Result<UserEntity, error::SystemError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    async fn find_post(&self, post_id: &Uuid) -> Result<PostEntity, error::SystemError> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    async fn attach_comments(
        &self,
        posts: Vec<PostEntity>,
    ) -> Result<Vec<PostResponse>, error::SystemError> {
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let mut by_post: HashMap<Uuid, Vec<CommentResponse>> = HashMap::new();
        for comment in self.post_repo.find_comments(&ids).await? {
            by_post.entry(comment.post_id).or_default().push(comment.into());
        }

        Ok(posts
            .into_iter()
            .map(|post| {
                let comments = by_post.remove(&post.id).unwrap_or_default();
                PostResponse::with_comments(post, comments)
            })
            .collect())
    }

    pub async fn create_post(
        &self,
        email: &str,
        text: String,
    ) -> Result<PostResponse, error::SystemError> {
        if text.trim().is_empty() {
            return Err(error::SystemError::invalid_input("Post text cannot be empty"));
        }

        let author = self.find_user(email).await?;
        let post = self
            .post_repo
            .create(&InsertPost { user_id: author.id, user_name: author.name, text })
            .await?;

        tracing::info!("Post {} created by {}", post.id, author.id);
        Ok(PostResponse::with_comments(post, vec![]))
    }

    pub async fn list_posts(&self, email: &str) -> Result<Vec<PostResponse>, error::SystemError> {
        let user = self.find_user(email).await?;
        let posts = self.post_repo.find_by_authors(&[user.id]).await?;
        self.attach_comments(posts).await
    }

    /// Posts by the user and everyone in their friend set, newest first.
    pub async fn feed(&self, email: &str) -> Result<Vec<PostResponse>, error::SystemError> {
        let user = self.find_user(email).await?;

        let mut authors = user.friends;
        authors.push(user.id);

        let posts = self.post_repo.find_by_authors(&authors).await?;
        self.attach_comments(posts).await
    }

    pub async fn like(&self, post_id: Uuid, email: &str) -> Result<Vec<String>, error::SystemError> {
        if email.trim().is_empty() {
            return Err(error::SystemError::invalid_input("Email is required"));
        }

        let (post, _) = tokio::try_join!(self.find_post(&post_id), self.find_user(email))?;
        if post.likes.iter().any(|liker| liker == email) {
            return Err(error::SystemError::already_liked("You have already liked this post"));
        }

        self.post_repo
            .add_like(&post_id, email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    pub async fn unlike(
        &self,
        post_id: Uuid,
        email: &str,
    ) -> Result<Vec<String>, error::SystemError> {
        if email.trim().is_empty() {
            return Err(error::SystemError::invalid_input("Email is required"));
        }

        let post = self.find_post(&post_id).await?;
        if !post.likes.iter().any(|liker| liker == email) {
            return Err(error::SystemError::not_liked("You have not liked this post yet"));
        }

        self.post_repo
            .remove_like(&post_id, email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    /// Appends a comment and returns every comment on the post, oldest first.
    pub async fn comment(
        &self,
        post_id: Uuid,
        email: &str,
        text: String,
    ) -> Result<Vec<CommentResponse>, error::SystemError> {
        if email.trim().is_empty() || text.trim().is_empty() {
            return Err(error::SystemError::invalid_input("Email and comment are required"));
        }

        let (user, post) = tokio::try_join!(self.find_user(email), self.find_post(&post_id))?;

        self.post_repo
            .add_comment(&InsertComment { post_id: post.id, user_id: user.id, comment_text: text })
            .await?;

        let comments = self.post_repo.find_comments(&[post.id]).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Deleting a post that is already gone succeeds.
    pub async fn delete(&self, post_id: Uuid) -> Result<(), error::SystemError> {
        let deleted = self.post_repo.delete(&post_id).await?;
        if deleted > 0 {
            tracing::info!("Post {} deleted", post_id);
        }
        Ok(())
    }
}
