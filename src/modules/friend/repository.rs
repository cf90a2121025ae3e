use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::PendingRequestRow;
use crate::modules::friend::schema::{FriendRequestEntity, FriendRequestStatus};

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    async fn find_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    /// Every request between the pair, in either direction.
    async fn find_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError>;

    /// Inserts a pending request, or revives a rejected row for the same ordered
    /// pair. Returns `None` when a non-rejected row already holds the pair.
    async fn create_or_revive(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn update_status(
        &self,
        request_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<(), error::SystemError>;

    /// Marks accepted requests between the pair rejected; returns rows touched.
    async fn reject_accepted_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<u64, error::SystemError>;

    async fn find_pending_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PendingRequestRow>, error::SystemError>;
}
