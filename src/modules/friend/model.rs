use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::model::PublicProfile;
use crate::utils::encode_picture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendStatus {
    None,
    Pending,
    Accepted,
}

#[derive(Debug, Serialize)]
pub struct FriendStatusResponse {
    pub status: FriendStatus,
}

#[derive(FromRow)]
pub struct PendingRequestRow {
    pub req_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<Vec<u8>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequestResponse {
    pub request_id: Uuid,
    pub sender: PublicProfile,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PendingRequestRow> for PendingRequestResponse {
    fn from(r: PendingRequestRow) -> Self {
        PendingRequestResponse {
            request_id: r.req_id,
            sender: PublicProfile {
                id: r.user_id,
                profile_picture: encode_picture(r.profile_picture.as_deref()),
                name: r.name,
                email: r.email,
            },
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    #[validate(email(message = "Invalid sender email"))]
    pub sender_email: String,
    #[validate(email(message = "Invalid receiver email"))]
    pub receiver_email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActingBody {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Body of remove-friend and query of friend-status.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PairBody {
    #[validate(email(message = "Invalid user email"))]
    pub user_email: String,
    #[validate(email(message = "Invalid friend email"))]
    pub friend_email: String,
}
