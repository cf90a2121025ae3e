use actix_web::{get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    modules::{
        friend::{
            model::{
                ActingBody, FriendStatusResponse, PairBody, PendingRequestResponse,
                SendRequestBody,
            },
            repository_pg::FriendRepositoryPg,
            schema::FriendRequestEntity,
            service::FriendService,
        },
        user::{model::PublicProfile, repository_pg::UserRepositoryPg},
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type FriendSvc = FriendService<FriendRepositoryPg, UserRepositoryPg>;

#[post("/requests")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<SendRequestBody>,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let request =
        friend_service.send_request(&body.0.sender_email, &body.0.receiver_email).await?;

    Ok(success::Success::created(Some(request)).message("Friend request sent successfully"))
}

#[get("/requests/{email}")]
pub async fn list_friend_requests(
    friend_service: web::Data<FriendSvc>,
    email: web::Path<String>,
) -> Result<success::Success<Vec<PendingRequestResponse>>, error::Error> {
    let requests = friend_service.list_pending_requests(&email).await?;

    Ok(success::Success::ok(Some(requests)).message("Friend requests retrieved successfully"))
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendSvc>,
    request_id: web::Path<Uuid>,
    body: ValidatedJson<ActingBody>,
) -> Result<success::Success<PublicProfile>, error::Error> {
    let sender = friend_service.accept_request(*request_id, &body.0.email).await?;

    Ok(success::Success::ok(Some(sender)).message("Friend request accepted successfully"))
}

#[post("/requests/{request_id}/reject")]
pub async fn reject_friend_request(
    friend_service: web::Data<FriendSvc>,
    request_id: web::Path<Uuid>,
    body: ValidatedJson<ActingBody>,
) -> Result<success::Success<()>, error::Error> {
    friend_service.reject_request(*request_id, &body.0.email).await?;

    Ok(success::Success::ok(None).message("Friend request rejected successfully"))
}

#[post("/remove")]
pub async fn remove_friend(
    friend_service: web::Data<FriendSvc>,
    body: ValidatedJson<PairBody>,
) -> Result<success::Success<()>, error::Error> {
    friend_service.remove_friend(&body.0.user_email, &body.0.friend_email).await?;

    Ok(success::Success::ok(None).message("Friend removed successfully"))
}

#[get("/status")]
pub async fn friend_status(
    friend_service: web::Data<FriendSvc>,
    query: ValidatedQuery<PairBody>,
) -> Result<success::Success<FriendStatusResponse>, error::Error> {
    let status = friend_service.query_status(&query.0.user_email, &query.0.friend_email).await?;

    Ok(success::Success::ok(Some(FriendStatusResponse { status })))
}

#[get("/list/{email}")]
pub async fn list_friends(
    friend_service: web::Data<FriendSvc>,
    email: web::Path<String>,
) -> Result<success::Success<Vec<PublicProfile>>, error::Error> {
    let friends = friend_service.list_friends(&email).await?;

    Ok(success::Success::ok(Some(friends)).message("Friends retrieved successfully"))
}
