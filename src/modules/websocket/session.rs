/// WebSocket Session Actor
///
/// One actor per connection. It remembers which channel the connection has
/// joined and writes outbound frames to the mpsc channel bridged by
/// handler.rs.
///
/// Store-and-publish work runs on a detached task, not on the actor context,
/// so it completes even when the socket closes first.
use std::sync::Arc;

use actix::prelude::*;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::error;

use super::channel::PushSender;
use super::events::*;
use super::message::{ClientMessage, ServerMessage};
use super::server::WebSocketServer;

pub struct WebSocketSession {
    pub id: Uuid,

    /// Channel joined by this connection, if any
    pub channel: Option<String>,

    pub server: Addr<WebSocketServer>,

    /// Outbound JSON frames (bridge -> handler.rs -> socket)
    pub tx: mpsc::UnboundedSender<String>,

    pub pusher: Arc<dyn PushSender>,
}

impl WebSocketSession {
    pub fn new(
        server: Addr<WebSocketServer>,
        tx: mpsc::UnboundedSender<String>,
        pusher: Arc<dyn PushSender>,
    ) -> Self {
        Self { id: Uuid::now_v7(), channel: None, server, tx, pusher }
    }

    fn send_to_client(&self, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = self.tx.send(json) {
                    tracing::error!("Failed to send frame to client (session {}): {}", self.id, e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize ServerMessage (session {}): {}", self.id, e);
            }
        }
    }

    fn handle_client_message(&mut self, msg: ClientMessage) {
        match msg {
            ClientMessage::Join { email } => self.handle_join(email),

            ClientMessage::SendMessage { sender_email, receiver_email, content } => {
                self.handle_send_message(sender_email, receiver_email, content);
            }

            ClientMessage::Ping => self.send_to_client(&ServerMessage::Pong),
        }
    }

    fn handle_join(&mut self, email: String) {
        if email.trim().is_empty() {
            self.send_to_client(&ServerMessage::Error {
                kind: "InvalidInput".to_string(),
                message: "Email is required to join a channel".to_string(),
            });
            return;
        }

        self.server.do_send(JoinChannel { session_id: self.id, channel: email.clone() });
        self.channel = Some(email.clone());
        self.send_to_client(&ServerMessage::Joined { channel: email });
    }

    /// The new message reaches this connection through its channel; failures
    /// come back as an error frame while the socket is still open.
    fn handle_send_message(&self, sender_email: String, receiver_email: String, content: String) {
        let pusher = self.pusher.clone();
        let tx = self.tx.clone();
        let session_id = self.id;

        actix_web::rt::spawn(async move {
            if let Err(e) = pusher.push(&sender_email, &receiver_email, content).await {
                let e = error::Error::from(e);
                tracing::warn!("Push message failed (session {}): {}", session_id, e);

                let frame = ServerMessage::Error {
                    kind: e.kind().to_string(),
                    message: e.message().into_owned(),
                };
                if let Ok(json) = serde_json::to_string(&frame) {
                    let _ = tx.send(json);
                }
            }
        });
    }
}

impl Actor for WebSocketSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!("WebSocket session started: {}", self.id);
        self.server.do_send(Connect { id: self.id, recipient: ctx.address().recipient() });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!("WebSocket session stopped: {} (channel {:?})", self.id, self.channel);
        self.server.do_send(Disconnect { id: self.id });
    }
}

impl Message for ClientMessage {
    type Result = ();
}

impl Handler<ClientMessage> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, _ctx: &mut Context<Self>) {
        self.handle_client_message(msg);
    }
}

impl Handler<CloseSession> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, _: CloseSession, ctx: &mut Context<Self>) {
        ctx.stop();
    }
}

/// Frames routed by the server actor go straight to the client.
impl Handler<ServerMessage> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, _ctx: &mut Context<Self>) {
        self.send_to_client(&msg);
    }
}
