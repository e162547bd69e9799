//! In-process event bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use labhub_domain::event::Event;

use crate::ports::EventSink;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped). Clones share the same channel.
#[derive(Clone)]
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventSink for InProcessEventBus {
    fn publish(&self, event: Event) {
        // broadcast::send fails only when there are zero receivers,
        // which is fine: the event is simply dropped.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labhub_domain::event::EventKind;

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        let event = Event::new(EventKind::RunStarted, serde_json::json!({}));
        let event_id = event.id;

        bus.publish(event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, event_id);
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let event = Event::new(EventKind::ScriptLoaded, serde_json::json!({}));
        let event_id = event.id;

        bus.publish(event);

        let r1 = rx1.recv().await.unwrap();
        let r2 = rx2.recv().await.unwrap();
        assert_eq!(r1.id, event_id);
        assert_eq!(r2.id, event_id);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        bus.publish(Event::new(EventKind::RunStopped, serde_json::json!({})));
    }

    #[tokio::test]
    async fn should_share_the_channel_across_clones() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        let clone = bus.clone();
        let event = Event::new(EventKind::StepExecuted, serde_json::json!({"step": 0}));
        let event_id = event.id;
        clone.publish(event);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, event_id);
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = InProcessEventBus::new(16);

        bus.publish(Event::new(EventKind::RunStarted, serde_json::json!({})));

        let mut rx = bus.subscribe();

        let later = Event::new(EventKind::RunFinished, serde_json::json!({}));
        let later_id = later.id;
        bus.publish(later);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, later_id);
    }
}
