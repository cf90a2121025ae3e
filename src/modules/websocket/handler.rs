/// WebSocket HTTP Handler
///
/// Upgrades the request and pumps frames both ways:
/// - Inbound:  client -> socket -> parse ClientMessage -> session actor
/// - Outbound: server actor -> session actor -> mpsc channel -> socket -> client
use std::sync::Arc;

use actix::{Actor, Addr};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_ws::Message;
use tokio::sync::mpsc;

use super::channel::PushSender;
use super::events::CloseSession;
use super::message::{ClientMessage, ServerMessage};
use super::server::WebSocketServer;
use super::session::WebSocketSession;
use crate::modules::message::handle::MessageSvc;

/// Unknown or malformed frames get an error reply instead of closing the socket.
fn parse_frame(text: &str) -> Result<ClientMessage, ServerMessage> {
    serde_json::from_str::<ClientMessage>(text).map_err(|e| {
        tracing::warn!(
            "Unparseable client frame: {} - raw: {}",
            e,
            text.chars().take(100).collect::<String>()
        );
        ServerMessage::Error { kind: "InvalidInput".to_string(), message: "Malformed frame".to_string() }
    })
}

/// Endpoint: GET /ws
pub async fn websocket_handler(
    req: HttpRequest,
    stream: web::Payload,
    server: web::Data<Addr<WebSocketServer>>,
    message_service: web::Data<MessageSvc>,
) -> Result<HttpResponse, Error> {
    tracing::debug!("WebSocket upgrade request from {:?}", req.peer_addr());

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, stream)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let pusher: Arc<dyn PushSender> = message_service.into_inner();
    let addr = WebSocketSession::new(server.get_ref().clone(), tx.clone(), pusher).start();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                msg = msg_stream.recv() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => match parse_frame(&text) {
                            Ok(client_msg) => addr.do_send(client_msg),
                            Err(reply) => {
                                if let Ok(json) = serde_json::to_string(&reply) {
                                    let _ = tx.send(json);
                                }
                            }
                        },

                        Some(Ok(Message::Ping(data))) => {
                            if let Err(e) = ws_session.pong(&data).await {
                                tracing::error!("Failed to send pong: {}", e);
                                break;
                            }
                        }

                        Some(Ok(Message::Close(reason))) => {
                            tracing::info!("WebSocket close frame: {:?}", reason);
                            break;
                        }

                        Some(Ok(Message::Binary(_))) => {
                            tracing::warn!("Binary frames are not supported");
                        }

                        Some(Ok(Message::Pong(_) | Message::Continuation(_) | Message::Nop)) => {}

                        Some(Err(e)) => {
                            tracing::error!("WebSocket protocol error: {}", e);
                            break;
                        }

                        None => break,
                    }
                }

                Some(json) = rx.recv() => {
                    if ws_session.text(json).await.is_err() {
                        tracing::error!("Failed to write frame to WebSocket client");
                        break;
                    }
                }
            }
        }

        // stopping the actor unregisters it from every channel
        addr.do_send(CloseSession);
        let _ = ws_session.close(None).await;
        tracing::debug!("WebSocket message loop ended");
    });

    Ok(response)
}
