//! In-process publish/subscribe for booking lifecycle events.
//!
//! The bus decouples feature modules: the reservation engine publishes
//! `booth.booked`, and invoicing/monitoring react without the engine knowing
//! they exist. It is constructed once at startup and handed to each module;
//! there is no process-wide singleton.
//!
//! # Guarantees
//!
//! - **In-memory, at-most-once**: events are not persisted and are lost on
//!   restart. Workflow state lives in entity status columns, never here.
//! - **Handler isolation**: a failing subscriber is logged and never affects
//!   the publisher or sibling subscribers.
//! - **Ordering**: handlers for one topic run in registration order on
//!   [`EventBus::emit_async`]; no ordering holds across topics.
//!
//! A bounded most-recent-first history is retained per topic for diagnostics.

pub mod event;

pub use event::{topics, BusEvent};

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maximum retained history entries per topic
const HISTORY_LIMIT: usize = 50;

type HandlerFuture = Pin<Box<dyn Future<Output = Result<(), BusError>> + Send>>;
type Handler = Arc<dyn Fn(BusEvent) -> HandlerFuture + Send + Sync>;

/// Error type subscriber handlers may return; logged per invocation
#[derive(Debug)]
pub struct BusError(pub String);

impl std::fmt::Display for BusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BusError {}

impl From<String> for BusError {
    fn from(s: String) -> Self {
        BusError(s)
    }
}

impl From<&str> for BusError {
    fn from(s: &str) -> Self {
        BusError(s.to_string())
    }
}

/// One retained history entry
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub event: BusEvent,
    pub at: DateTime<Utc>,
}

struct Registration {
    module: String,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    subscribers: HashMap<&'static str, Vec<Registration>>,
    history: HashMap<&'static str, VecDeque<HistoryEntry>>,
}

/// In-process event bus keyed by topic name.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<RwLock<Inner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a topic.
    ///
    /// `module` names the subscriber in logs. Handlers for the same topic
    /// fire in registration order.
    pub async fn subscribe<F, Fut>(&self, topic: &'static str, module: impl Into<String>, f: F)
    where
        F: Fn(BusEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BusError>> + Send + 'static,
    {
        let module = module.into();
        tracing::debug!(topic, module = %module, "Registering event handler");

        let handler: Handler = Arc::new(move |event| Box::pin(f(event)));
        let mut inner = self.inner.write().await;
        inner
            .subscribers
            .entry(topic)
            .or_default()
            .push(Registration { module, handler });
    }

    /// Publish fire-and-forget: each handler runs as its own spawned task.
    ///
    /// Returns the number of handlers notified.
    pub async fn emit(&self, event: BusEvent) -> usize {
        let topic = event.topic();
        let registrations = self.record_and_collect(&event).await;
        let count = registrations.len();

        for (module, handler) in registrations {
            let event = event.clone();
            tokio::spawn(async move {
                if let Err(e) = handler(event).await {
                    tracing::error!(topic, module = %module, error = %e, "Event handler failed");
                }
            });
        }

        count
    }

    /// Publish and await every handler, including asynchronous ones.
    ///
    /// Resolves only once all handlers have completed. Handlers run
    /// sequentially in registration order; errors are logged individually and
    /// do not short-circuit the remaining handlers.
    pub async fn emit_async(&self, event: BusEvent) -> usize {
        let topic = event.topic();
        let registrations = self.record_and_collect(&event).await;
        let count = registrations.len();

        for (module, handler) in registrations {
            if let Err(e) = handler(event.clone()).await {
                tracing::error!(topic, module = %module, error = %e, "Event handler failed");
            }
        }

        count
    }

    /// Recent events for a topic, most recent first
    pub async fn history(&self, topic: &str) -> Vec<HistoryEntry> {
        let inner = self.inner.read().await;
        inner
            .history
            .get(topic)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of handlers registered for a topic
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let inner = self.inner.read().await;
        inner.subscribers.get(topic).map(|v| v.len()).unwrap_or(0)
    }

    async fn record_and_collect(&self, event: &BusEvent) -> Vec<(String, Handler)> {
        let topic = event.topic();
        let mut inner = self.inner.write().await;

        let entries = inner.history.entry(topic).or_default();
        entries.push_front(HistoryEntry {
            event: event.clone(),
            at: Utc::now(),
        });
        entries.truncate(HISTORY_LIMIT);

        inner
            .subscribers
            .get(topic)
            .map(|regs| {
                regs.iter()
                    .map(|r| (r.module.clone(), r.handler.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn released_event() -> BusEvent {
        BusEvent::BoothReleased {
            reservation_id: Uuid::new_v4(),
            booth_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn emit_async_awaits_all_handlers() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            bus.subscribe(topics::BOOTH_RELEASED, "test", move |_| {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            })
            .await;
        }

        let notified = bus.emit_async(released_event()).await;
        assert_eq!(notified, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn handler_error_does_not_break_fanout() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        bus.subscribe(topics::BOOTH_RELEASED, "failing", |_| async {
            Err(BusError::from("handler exploded"))
        })
        .await;

        let calls2 = calls.clone();
        bus.subscribe(topics::BOOTH_RELEASED, "healthy", move |_| {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        bus.emit_async(released_event()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn topics_are_independent() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let calls2 = calls.clone();
        bus.subscribe(topics::PAYMENT_COMPLETED, "payments-only", move |_| {
            let calls = calls2.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        bus.emit_async(released_event()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn history_is_most_recent_first_and_bounded() {
        let bus = EventBus::new();

        for _ in 0..(HISTORY_LIMIT + 10) {
            bus.emit_async(released_event()).await;
        }

        let last = released_event();
        let last_booth = match &last {
            BusEvent::BoothReleased { booth_id, .. } => *booth_id,
            _ => unreachable!(),
        };
        bus.emit_async(last.clone()).await;

        let history = bus.history(topics::BOOTH_RELEASED).await;
        assert_eq!(history.len(), HISTORY_LIMIT);
        match &history[0].event {
            BusEvent::BoothReleased { booth_id, .. } => assert_eq!(*booth_id, last_booth),
            other => panic!("unexpected event in history: {:?}", other),
        }
    }

    #[tokio::test]
    async fn handlers_run_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = order.clone();
            bus.subscribe(topics::BOOTH_BOOKED, format!("handler-{}", i), move |_| {
                let order = order.clone();
                async move {
                    order.lock().unwrap().push(i);
                    Ok(())
                }
            })
            .await;
        }

        bus.emit_async(BusEvent::BoothBooked {
            reservation_id: Uuid::new_v4(),
            booth_id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            exhibitor_id: Uuid::new_v4(),
        })
        .await;

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }
}
