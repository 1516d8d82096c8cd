//! Typed requests from the map layer to the store.
//!
//! Marker popups do not touch store state directly; they send a
//! [`StoreEvent`] through a cloned [`EventSender`] and the store applies it.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    RemoveUnitRequested { unit_id: String },
    RemoveCityRequested { name: String },
}

#[derive(Debug, thiserror::Error)]
#[error("store event channel closed")]
pub struct ChannelClosed;

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<StoreEvent>,
}

impl EventSender {
    #[must_use]
    pub fn new(sender: mpsc::Sender<StoreEvent>) -> Self {
        Self { sender }
    }

    /// Send an event, waiting for channel capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelClosed`] once the receiving store has shut down.
    pub async fn send(&self, event: StoreEvent) -> Result<(), ChannelClosed> {
        self.sender.send(event).await.map_err(|_| ChannelClosed)
    }

    /// # Errors
    ///
    /// Returns [`ChannelClosed`] once the receiving store has shut down.
    pub async fn request_unit_removal(&self, unit_id: &str) -> Result<(), ChannelClosed> {
        self.send(StoreEvent::RemoveUnitRequested {
            unit_id: unit_id.to_string(),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`ChannelClosed`] once the receiving store has shut down.
    pub async fn request_city_removal(&self, name: &str) -> Result<(), ChannelClosed> {
        self.send(StoreEvent::RemoveCityRequested {
            name: name.to_string(),
        })
        .await
    }
}

/// A bounded channel for store events.
#[must_use]
pub fn event_channel(capacity: usize) -> (EventSender, mpsc::Receiver<StoreEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    (EventSender::new(tx), rx)
}
