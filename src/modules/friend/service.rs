use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendStatus, PendingRequestResponse},
            repository::FriendRequestRepository,
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::{model::PublicProfile, repository::UserRepository, schema::UserEntity},
    },
};

/// Relationship between two identities as seen from either side.
pub fn resolve_status(
    a: &UserEntity,
    b: &UserEntity,
    requests: &[FriendRequestEntity],
) -> FriendStatus {
    if a.is_friend_of(&b.id) || b.is_friend_of(&a.id) {
        return FriendStatus::Accepted;
    }
    if requests.iter().any(|r| r.status == FriendRequestStatus::Pending) {
        return FriendStatus::Pending;
    }
    FriendStatus::None
}

#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: FriendRequestRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    request_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendService<R, U>
where
    R: FriendRequestRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(request_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        FriendService { request_repo, user_repo }
    }

    async fn find_user(&self, email: &str) -> Result<UserEntity, error::SystemError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    async fn find_pair(
        &self,
        email_a: &str,
        email_b: &str,
    ) -> Result<(UserEntity, UserEntity), error::SystemError> {
        let (a, b) = tokio::try_join!(self.find_user(email_a), self.find_user(email_b))?;
        Ok((a, b))
    }

    pub async fn send_request(
        &self,
        sender_email: &str,
        receiver_email: &str,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let (sender, receiver) = self.find_pair(sender_email, receiver_email).await?;

        if sender.is_friend_of(&receiver.id) {
            return Err(error::SystemError::already_friends(
                "You are already friends with this user",
            ));
        }

        let existing = self.request_repo.find_between(&sender.id, &receiver.id).await?;
        if existing.iter().any(FriendRequestEntity::is_blocking) {
            return Err(error::SystemError::duplicate_request(
                "A friend request already exists between these users",
            ));
        }

        let request = self
            .request_repo
            .create_or_revive(&sender.id, &receiver.id)
            .await?
            .ok_or_else(|| {
                error::SystemError::duplicate_request(
                    "A friend request already exists between these users",
                )
            })?;

        tracing::info!("Friend request {} sent {} -> {}", request.id, sender.id, receiver.id);
        Ok(request)
    }

    /// Flips the request to accepted, then writes each side of the edge with its
    /// own update. A failure between the writes leaves the edge one-sided.
    pub async fn accept_request(
        &self,
        request_id: Uuid,
        acting_email: &str,
    ) -> Result<PublicProfile, error::SystemError> {
        let actor = self.find_user(acting_email).await?;
        let request = self.require_receiver(request_id, &actor, "accept").await?;

        self.request_repo.update_status(&request.id, FriendRequestStatus::Accepted).await?;
        self.user_repo.add_friend(&request.sender_id, &request.receiver_id).await?;
        self.user_repo.add_friend(&request.receiver_id, &request.sender_id).await?;

        let sender = self
            .user_repo
            .find_by_id(&request.sender_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        tracing::info!("Friend request {} accepted", request.id);
        Ok(PublicProfile::from(&sender))
    }

    pub async fn reject_request(
        &self,
        request_id: Uuid,
        acting_email: &str,
    ) -> Result<(), error::SystemError> {
        let actor = self.find_user(acting_email).await?;
        let request = self.require_receiver(request_id, &actor, "reject").await?;

        self.request_repo.update_status(&request.id, FriendRequestStatus::Rejected).await?;

        tracing::info!("Friend request {} rejected", request.id);
        Ok(())
    }

    async fn require_receiver(
        &self,
        request_id: Uuid,
        actor: &UserEntity,
        action: &str,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = self
            .request_repo
            .find_by_id(&request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        if request.receiver_id != actor.id {
            return Err(error::SystemError::forbidden(format!(
                "You are not authorized to {action} this request"
            )));
        }

        if request.status != FriendRequestStatus::Pending {
            return Err(error::SystemError::invalid_input("Friend request is no longer pending"));
        }

        Ok(request)
    }

    /// Idempotent: a missing edge is not an error.
    pub async fn remove_friend(
        &self,
        user_email: &str,
        friend_email: &str,
    ) -> Result<(), error::SystemError> {
        let (user, friend) = self.find_pair(user_email, friend_email).await?;

        self.user_repo.remove_friend(&user.id, &friend.id).await?;
        self.user_repo.remove_friend(&friend.id, &user.id).await?;

        let reset = self.request_repo.reject_accepted_between(&user.id, &friend.id).await?;

        tracing::info!("Removed edge {} <-> {} ({} request(s) reset)", user.id, friend.id, reset);
        Ok(())
    }

    pub async fn query_status(
        &self,
        user_email: &str,
        friend_email: &str,
    ) -> Result<FriendStatus, error::SystemError> {
        let (user, friend) = self.find_pair(user_email, friend_email).await?;
        let requests = self.request_repo.find_between(&user.id, &friend.id).await?;
        Ok(resolve_status(&user, &friend, &requests))
    }

    pub async fn list_friends(&self, email: &str) -> Result<Vec<PublicProfile>, error::SystemError> {
        let user = self.find_user(email).await?;
        let friends = self.user_repo.find_by_ids(&user.friends).await?;
        Ok(friends.iter().map(PublicProfile::from).collect())
    }

    pub async fn list_pending_requests(
        &self,
        email: &str,
    ) -> Result<Vec<PendingRequestResponse>, error::SystemError> {
        let user = self.find_user(email).await?;
        let rows = self.request_repo.find_pending_to_user(&user.id).await?;
        Ok(rows.into_iter().map(PendingRequestResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{InMemoryStore, Seed};

    type Svc = FriendService<InMemoryStore, InMemoryStore>;

    fn setup() -> (Arc<InMemoryStore>, Svc, Uuid, Uuid) {
        let store = Arc::new(InMemoryStore::default());
        let a = store.seed_user("a@example.com");
        let b = store.seed_user("b@example.com");
        let svc = FriendService::with_dependencies(store.clone(), store.clone());
        (store, svc, a, b)
    }

    #[actix_web::test]
    async fn accept_creates_symmetric_edge() {
        let (store, svc, a, b) = setup();

        let request = svc.send_request("a@example.com", "b@example.com").await.unwrap();
        assert_eq!(request.status, FriendRequestStatus::Pending);

        let sender = svc.accept_request(request.id, "b@example.com").await.unwrap();
        assert_eq!(sender.id, a);

        assert!(store.user(a).unwrap().friends.contains(&b));
        assert!(store.user(b).unwrap().friends.contains(&a));
        assert_eq!(store.request(request.id).unwrap().status, FriendRequestStatus::Accepted);
    }

    #[actix_web::test]
    async fn second_send_is_duplicate() {
        let (_store, svc, _a, _b) = setup();

        svc.send_request("a@example.com", "b@example.com").await.unwrap();
        let err = svc.send_request("a@example.com", "b@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::DuplicateRequest(_)));

        // the reverse direction is blocked as well
        let err = svc.send_request("b@example.com", "a@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::DuplicateRequest(_)));
    }

    #[actix_web::test]
    async fn send_to_friend_is_already_friends() {
        let (store, svc, a, b) = setup();
        store.link(a, b);

        let err = svc.send_request("a@example.com", "b@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::AlreadyFriends(_)));
    }

    #[actix_web::test]
    async fn send_to_unknown_is_not_found() {
        let (_store, svc, _a, _b) = setup();
        let err = svc.send_request("a@example.com", "ghost@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn only_receiver_may_answer() {
        let (store, svc, _a, _b) = setup();
        store.seed_user("c@example.com");
        let request = svc.send_request("a@example.com", "b@example.com").await.unwrap();

        let err = svc.accept_request(request.id, "a@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));
        let err = svc.reject_request(request.id, "c@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Forbidden(_)));

        let err = svc.accept_request(Uuid::now_v7(), "b@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn rejected_is_terminal_but_pair_may_retry() {
        let (store, svc, a, b) = setup();
        let request = svc.send_request("a@example.com", "b@example.com").await.unwrap();

        svc.reject_request(request.id, "b@example.com").await.unwrap();
        let err = svc.accept_request(request.id, "b@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::InvalidInput(_)));
        assert!(!store.user(b).unwrap().friends.contains(&a));

        let retry = svc.send_request("a@example.com", "b@example.com").await.unwrap();
        assert_eq!(retry.status, FriendRequestStatus::Pending);
    }

    #[actix_web::test]
    async fn remove_friend_clears_edges_and_allows_new_request() {
        let (store, svc, a, b) = setup();
        let request = svc.send_request("a@example.com", "b@example.com").await.unwrap();
        svc.accept_request(request.id, "b@example.com").await.unwrap();

        svc.remove_friend("a@example.com", "b@example.com").await.unwrap();

        assert!(!store.user(a).unwrap().friends.contains(&b));
        assert!(!store.user(b).unwrap().friends.contains(&a));
        assert_eq!(store.request(request.id).unwrap().status, FriendRequestStatus::Rejected);

        svc.send_request("a@example.com", "b@example.com").await.unwrap();
    }

    #[actix_web::test]
    async fn remove_without_edge_is_noop() {
        let (_store, svc, _a, _b) = setup();
        svc.remove_friend("a@example.com", "b@example.com").await.unwrap();
        svc.remove_friend("b@example.com", "a@example.com").await.unwrap();
    }

    #[actix_web::test]
    async fn status_is_symmetric() {
        let (store, svc, a, b) = setup();

        assert_eq!(svc.query_status("a@example.com", "b@example.com").await.unwrap(), FriendStatus::None);

        let request = svc.send_request("a@example.com", "b@example.com").await.unwrap();
        assert_eq!(svc.query_status("a@example.com", "b@example.com").await.unwrap(), FriendStatus::Pending);
        assert_eq!(svc.query_status("b@example.com", "a@example.com").await.unwrap(), FriendStatus::Pending);

        svc.accept_request(request.id, "b@example.com").await.unwrap();
        assert_eq!(svc.query_status("b@example.com", "a@example.com").await.unwrap(), FriendStatus::Accepted);

        // a one-sided edge still reads the same from both ends
        store.unlink_one_side(b, a);
        assert_eq!(svc.query_status("a@example.com", "b@example.com").await.unwrap(), FriendStatus::Accepted);
        assert_eq!(svc.query_status("b@example.com", "a@example.com").await.unwrap(), FriendStatus::Accepted);
    }

    #[actix_web::test]
    async fn self_request_is_permitted() {
        let (_store, svc, a, _b) = setup();
        let request = svc.send_request("a@example.com", "a@example.com").await.unwrap();
        assert_eq!(request.sender_id, a);
        assert_eq!(request.receiver_id, a);
    }

    #[actix_web::test]
    async fn pending_list_and_friend_list() {
        let (_store, svc, a, _b) = setup();
        let request = svc.send_request("a@example.com", "b@example.com").await.unwrap();

        let pending = svc.list_pending_requests("b@example.com").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].request_id, request.id);
        assert_eq!(pending[0].sender.id, a);
        assert!(svc.list_pending_requests("a@example.com").await.unwrap().is_empty());

        svc.accept_request(request.id, "b@example.com").await.unwrap();
        assert!(svc.list_pending_requests("b@example.com").await.unwrap().is_empty());

        let friends = svc.list_friends("b@example.com").await.unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].email, "a@example.com");
    }
}
