//! Real-time booth-status fan-out over WebSockets.
//!
//! Clients join per-exhibition-event rooms by sending an explicit frame
//! naming the event id; booth-status changes are pushed only to members of
//! the matching room. Membership is in-memory and transient: a reconnecting
//! client re-joins its rooms.

pub mod ws;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

/// Per-room broadcast channel capacity. Slow clients past this lag and drop
/// frames rather than backpressure the publisher.
const ROOM_CAPACITY: usize = 256;

/// Status update pushed to room members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub event_id: Uuid,
    pub booth_id: Uuid,
    pub status: String,
}

/// Room registry keyed by exhibition event id.
#[derive(Clone, Default)]
pub struct Broadcaster {
    rooms: Arc<RwLock<HashMap<Uuid, broadcast::Sender<StatusUpdate>>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join an exhibition event's room, creating it on first join
    pub async fn subscribe(&self, event_id: Uuid) -> broadcast::Receiver<StatusUpdate> {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(event_id)
            .or_insert_with(|| broadcast::channel(ROOM_CAPACITY).0)
            .subscribe()
    }

    /// Push an update to the matching room.
    ///
    /// Returns the number of clients reached; zero when the room does not
    /// exist or is empty (no global fallback broadcast).
    pub async fn publish(&self, update: StatusUpdate) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(&update.event_id) {
            Some(sender) => sender.send(update).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop rooms nobody is subscribed to
    pub async fn prune_empty_rooms(&self) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, sender| sender.receiver_count() > 0);
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(event_id: Uuid) -> StatusUpdate {
        StatusUpdate {
            event_id,
            booth_id: Uuid::new_v4(),
            status: "reserved".to_string(),
        }
    }

    #[tokio::test]
    async fn members_receive_room_updates() {
        let broadcaster = Broadcaster::new();
        let event_id = Uuid::new_v4();
        let mut rx = broadcaster.subscribe(event_id).await;

        let sent = update(event_id);
        let reached = broadcaster.publish(sent.clone()).await;

        assert_eq!(reached, 1);
        assert_eq!(rx.recv().await.unwrap(), sent);
    }

    #[tokio::test]
    async fn no_room_means_no_delivery() {
        let broadcaster = Broadcaster::new();
        let event_a = Uuid::new_v4();
        let event_b = Uuid::new_v4();
        let mut rx = broadcaster.subscribe(event_a).await;

        let reached = broadcaster.publish(update(event_b)).await;
        assert_eq!(reached, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn prune_removes_abandoned_rooms() {
        let broadcaster = Broadcaster::new();
        let event_id = Uuid::new_v4();
        {
            let _rx = broadcaster.subscribe(event_id).await;
            assert_eq!(broadcaster.room_count().await, 1);
        }
        broadcaster.prune_empty_rooms().await;
        assert_eq!(broadcaster.room_count().await, 0);
    }
}
