/// WebSocket message protocol
///
/// Frames exchanged between a client and the server over `/ws`. Every frame is
/// a JSON object discriminated by its `type` field.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frames sent by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Subscribe this connection to the channel named after the given email
    Join { email: String },

    /// Persist a direct message and push it to both parties
    #[serde(rename_all = "camelCase")]
    SendMessage { sender_email: String, receiver_email: String, content: String },

    /// Keep-alive
    Ping,
}

/// A stored message shaped for one side of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEvent {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    pub is_from_user: bool,
    pub sender_email: String,
    pub receiver_email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The connection now listens on `channel`
    Joined { channel: String },

    /// A message addressed to (or sent by) the channel owner
    NewMessage(ChatEvent),

    /// Pong response for Ping
    Pong,

    /// A failed operation; the connection stays open
    Error { kind: String, message: String },
}
