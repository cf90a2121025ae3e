/// WebSocket actor events
///
/// Messages exchanged between session actors and the server actor.
use actix::prelude::*;
use uuid::Uuid;

use super::message::ServerMessage;

/// A session connected
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    /// Unique session ID
    pub id: Uuid,
    /// Where the server delivers frames for this session
    pub recipient: Recipient<ServerMessage>,
}

/// A session went away
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: Uuid,
}

/// A session subscribes to a named channel
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinChannel {
    pub session_id: Uuid,
    pub channel: String,
}

/// Deliver a frame to every session listening on a channel
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct PublishToChannel {
    pub channel: String,
    pub message: ServerMessage,
}

/// The socket loop ended; the session actor should stop
#[derive(Message)]
#[rtype(result = "()")]
pub struct CloseSession;
