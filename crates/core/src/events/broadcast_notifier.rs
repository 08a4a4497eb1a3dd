use tokio::sync::broadcast;

use super::events_model::ChangeTopic;
use super::events_traits::ChangeNotifierTrait;

/// Publish/subscribe notifier backed by a tokio broadcast channel.
///
/// Subscriber lifecycle (SSE/WebSocket connections, reconnects) is managed
/// entirely by the transport layer; the core only publishes.
pub struct BroadcastNotifier {
    tx: broadcast::Sender<ChangeTopic>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeTopic> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ChangeNotifierTrait for BroadcastNotifier {
    fn publish(&self, topic: ChangeTopic) {
        // Err only means nobody is listening right now.
        let _ = self.tx.send(topic);
    }
}
