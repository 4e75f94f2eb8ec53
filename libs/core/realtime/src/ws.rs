//! WebSocket endpoint speaking the join/leave room protocol.
//!
//! Inbound frames:
//!
//! ```json
//! {"action": "join", "event_id": "..."}
//! {"action": "leave", "event_id": "..."}
//! ```
//!
//! Outbound frames are `joined`/`left` acknowledgements, `error` frames for
//! unparsable input, and `booth_status_changed` pushes for every room the
//! client is currently in.

use crate::{Broadcaster, StatusUpdate};
use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Frames accepted from clients
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientFrame {
    Join { event_id: Uuid },
    Leave { event_id: Uuid },
}

/// Frames pushed to clients
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Joined {
        event_id: Uuid,
    },
    Left {
        event_id: Uuid,
    },
    BoothStatusChanged {
        event_id: Uuid,
        booth_id: Uuid,
        status: String,
    },
    Error {
        message: String,
    },
}

impl From<StatusUpdate> for ServerFrame {
    fn from(update: StatusUpdate) -> Self {
        ServerFrame::BoothStatusChanged {
            event_id: update.event_id,
            booth_id: update.booth_id,
            status: update.status,
        }
    }
}

/// `GET /ws` upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(broadcaster): State<Broadcaster>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Broadcaster) {
    let (mut sink, mut stream) = socket.split();

    // All outbound traffic funnels through one channel so room forwarders and
    // protocol acknowledgements cannot interleave partial writes.
    let (out_tx, mut out_rx) = mpsc::channel::<ServerFrame>(64);

    let writer = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            let payload = match serde_json::to_string(&frame) {
                Ok(p) => p,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize outbound frame");
                    continue;
                }
            };
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // One forwarder task per joined room, aborted on leave or disconnect
    let mut memberships: HashMap<Uuid, JoinHandle<()>> = HashMap::new();

    while let Some(Ok(message)) = stream.next().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        match serde_json::from_str::<ClientFrame>(text.as_str()) {
            Ok(ClientFrame::Join { event_id }) => {
                if memberships.contains_key(&event_id) {
                    continue;
                }

                let mut room_rx = broadcaster.subscribe(event_id).await;
                let forward_tx = out_tx.clone();
                let forwarder = tokio::spawn(async move {
                    loop {
                        match room_rx.recv().await {
                            Ok(update) => {
                                if forward_tx.send(update.into()).await.is_err() {
                                    break;
                                }
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                                tracing::warn!(event_id = %event_id, skipped, "Client lagged, frames dropped");
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        }
                    }
                });

                memberships.insert(event_id, forwarder);
                let _ = out_tx.send(ServerFrame::Joined { event_id }).await;
            }
            Ok(ClientFrame::Leave { event_id }) => {
                if let Some(forwarder) = memberships.remove(&event_id) {
                    forwarder.abort();
                    let _ = out_tx.send(ServerFrame::Left { event_id }).await;
                }
            }
            Err(e) => {
                let _ = out_tx
                    .send(ServerFrame::Error {
                        message: format!("Unrecognized frame: {}", e),
                    })
                    .await;
            }
        }
    }

    // Disconnect: membership is transient by design
    for (_, forwarder) in memberships {
        forwarder.abort();
    }
    drop(out_tx);
    let _ = writer.await;
    broadcaster.prune_empty_rooms().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_frames_parse() {
        let id = Uuid::new_v4();
        let frame: ClientFrame =
            serde_json::from_str(&format!(r#"{{"action":"join","event_id":"{}"}}"#, id)).unwrap();
        assert!(matches!(frame, ClientFrame::Join { event_id } if event_id == id));

        let frame: ClientFrame =
            serde_json::from_str(&format!(r#"{{"action":"leave","event_id":"{}"}}"#, id)).unwrap();
        assert!(matches!(frame, ClientFrame::Leave { event_id } if event_id == id));
    }

    #[test]
    fn status_update_becomes_push_frame() {
        let update = StatusUpdate {
            event_id: Uuid::new_v4(),
            booth_id: Uuid::new_v4(),
            status: "booked".to_string(),
        };
        let json = serde_json::to_value(ServerFrame::from(update.clone())).unwrap();
        assert_eq!(json["type"], "booth_status_changed");
        assert_eq!(json["status"], "booked");
        assert_eq!(json["booth_id"], update.booth_id.to_string());
    }
}
