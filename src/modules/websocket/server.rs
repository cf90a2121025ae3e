/// WebSocket server actor
///
/// Owns the channel registry: which live sessions listen on which channel.
/// A channel is named after an identity's email, so publishing to it reaches
/// every tab that identity has open.
use actix::prelude::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::events::*;
use super::message::ServerMessage;

pub struct WebSocketServer {
    /// session_id -> delivery target
    sessions: HashMap<Uuid, Recipient<ServerMessage>>,

    /// channel name -> listening session ids
    channels: HashMap<String, HashSet<Uuid>>,
}

impl WebSocketServer {
    pub fn new() -> Self {
        Self { sessions: HashMap::new(), channels: HashMap::new() }
    }

    fn send_to_session(&self, session_id: &Uuid, message: ServerMessage) {
        if let Some(recipient) = self.sessions.get(session_id) {
            recipient.do_send(message);
        }
    }
}

impl Actor for WebSocketServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket server started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket server stopped");
    }
}

impl Handler<Connect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) {
        tracing::debug!("New WebSocket session connected: {}", msg.id);
        self.sessions.insert(msg.id, msg.recipient);
    }
}

impl Handler<Disconnect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) {
        tracing::debug!("WebSocket session disconnected: {}", msg.id);

        self.sessions.remove(&msg.id);

        for listeners in self.channels.values_mut() {
            listeners.remove(&msg.id);
        }
        self.channels.retain(|_, listeners| !listeners.is_empty());
    }
}

impl Handler<JoinChannel> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: JoinChannel, _: &mut Context<Self>) {
        let listeners = self.channels.entry(msg.channel.clone()).or_default();
        listeners.insert(msg.session_id);

        tracing::info!(
            "Session {} joined channel {} ({} listener(s))",
            msg.session_id,
            msg.channel,
            listeners.len()
        );
    }
}

impl Handler<PublishToChannel> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: PublishToChannel, _: &mut Context<Self>) {
        let Some(listeners) = self.channels.get(&msg.channel) else {
            tracing::debug!("No listener on channel {}, event dropped", msg.channel);
            return;
        };

        for session_id in listeners {
            self.send_to_session(session_id, msg.message.clone());
        }

        tracing::debug!("Published to channel {}: {} session(s)", msg.channel, listeners.len());
    }
}

impl Message for ServerMessage {
    type Result = ();
}

impl Default for WebSocketServer {
    fn default() -> Self {
        Self::new()
    }
}
