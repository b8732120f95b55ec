// Display sink fanning updates out to every connected viewer
use crate::application::pipeline::DisplaySink;
use crate::domain::telemetry::DisplayUpdate;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<DisplayUpdate>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DisplayUpdate> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl DisplaySink for BroadcastSink {
    fn on_update(&mut self, update: DisplayUpdate) {
        // No viewers connected is not an error
        let _ = self.tx.send(update);
    }
}
