/// Real-time channel seams
///
/// Services publish through `ChannelPublisher` instead of holding the server
/// actor directly, and sessions hand inbound messages to a `PushSender`, so
/// either side can be swapped for a fake.
use actix::Addr;

use crate::api::error;

use super::events::PublishToChannel;
use super::message::ServerMessage;
use super::server::WebSocketServer;

pub trait ChannelPublisher: Send + Sync {
    /// Fire-and-forget; a channel without listeners drops the event.
    fn publish(&self, channel: &str, event: ServerMessage);
}

impl ChannelPublisher for Addr<WebSocketServer> {
    fn publish(&self, channel: &str, event: ServerMessage) {
        self.do_send(PublishToChannel { channel: channel.to_string(), message: event });
    }
}

/// Stores a direct message and publishes it to both parties' channels.
#[async_trait::async_trait]
pub trait PushSender: Send + Sync {
    async fn push(
        &self,
        sender_email: &str,
        receiver_email: &str,
        content: String,
    ) -> Result<(), error::SystemError>;
}
