/// WebSocket Module
///
/// Push path of the messaging channel:
///
/// - Message protocol (ClientMessage & ServerMessage)
/// - WebSocket Server actor (channel registry)
/// - WebSocket Session actor (one per connection)
/// - HTTP handler (upgrade HTTP to WebSocket)
/// - ChannelPublisher (the seam services publish through)
pub mod channel;
pub mod events;
pub mod handler;
pub mod message;
pub mod server;
pub mod session;
