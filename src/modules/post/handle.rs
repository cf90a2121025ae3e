use actix_web::{delete, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    modules::{
        post::{
            model::{
                CommentBody, CommentsResponse, CreatePostBody, LikeBody, LikesResponse,
                PostResponse,
            },
            repository_pg::PostRepositoryPg,
            service::PostService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::ValidatedJson,
};

pub type PostSvc = PostService<PostRepositoryPg, UserRepositoryPg>;

#[post("")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    body: ValidatedJson<CreatePostBody>,
) -> Result<success::Success<PostResponse>, error::Error> {
    let body = body.0;
    let post = post_service.create_post(&body.email, body.text).await?;

    Ok(success::Success::created(Some(post)).message("Post uploaded successfully"))
}

#[get("/user/{email}")]
pub async fn list_posts(
    post_service: web::Data<PostSvc>,
    email: web::Path<String>,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let posts = post_service.list_posts(&email).await?;

    Ok(success::Success::ok(Some(posts)))
}

#[get("/feed/{email}")]
pub async fn feed(
    post_service: web::Data<PostSvc>,
    email: web::Path<String>,
) -> Result<success::Success<Vec<PostResponse>>, error::Error> {
    let posts = post_service.feed(&email).await?;

    Ok(success::Success::ok(Some(posts)))
}

#[post("/{post_id}/like")]
pub async fn like_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<LikeBody>,
) -> Result<success::Success<LikesResponse>, error::Error> {
    let likes = post_service.like(*post_id, &body.0.email).await?;

    Ok(success::Success::ok(Some(LikesResponse { likes })).message("Post liked successfully"))
}

#[post("/{post_id}/unlike")]
pub async fn unlike_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<LikeBody>,
) -> Result<success::Success<LikesResponse>, error::Error> {
    let likes = post_service.unlike(*post_id, &body.0.email).await?;

    Ok(success::Success::ok(Some(LikesResponse { likes })).message("Post unliked successfully"))
}

#[post("/{post_id}/comments")]
pub async fn comment_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<CommentBody>,
) -> Result<success::Success<CommentsResponse>, error::Error> {
    let body = body.0;
    let comments = post_service.comment(*post_id, &body.email, body.comment).await?;

    Ok(success::Success::ok(Some(CommentsResponse { comments }))
        .message("Comment added successfully"))
}

#[delete("/{post_id}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
) -> Result<success::Success<()>, error::Error> {
    post_service.delete(*post_id).await?;

    Ok(success::Success::ok(None).message("Post deleted successfully"))
}
