use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::message::schema::MessageEntity;

#[derive(Debug, Clone)]
pub struct InsertMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    #[validate(email(message = "Invalid sender email"))]
    pub sender_email: String,
    #[validate(email(message = "Invalid receiver email"))]
    pub receiver_email: String,
    #[validate(length(min = 1, message = "Message content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[validate(email(message = "Invalid user email"))]
    pub user_email: String,
    #[validate(email(message = "Invalid friend email"))]
    pub friend_email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessageResponse {
    pub message_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&MessageEntity> for SentMessageResponse {
    fn from(m: &MessageEntity) -> Self {
        SentMessageResponse { message_id: m.id, created_at: m.created_at }
    }
}

/// One row of a conversation, seen from the requesting side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    pub is_from_user: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ChatMessageResponse {
    pub fn for_viewer(m: MessageEntity, viewer: &Uuid) -> Self {
        ChatMessageResponse {
            id: m.id,
            is_from_user: m.sender_id == *viewer,
            content: m.content,
            created_at: m.created_at,
        }
    }
}
