use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Fire-and-forget domain events. Services emit these after a state change
/// commits; the processing loop records them. Delivery failures never fail the
/// originating request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Transfer lifecycle
    TransferCreated { transfer_id: Uuid, doc_no: String },
    TransferApproved { transfer_id: Uuid, doc_no: String },
    TransferRejected { transfer_id: Uuid, doc_no: String },
    TransferCancelled { transfer_id: Uuid, doc_no: String },

    // Inventory
    LowStock {
        product_id: Uuid,
        name: String,
        quantity: i32,
        min_level: i32,
    },

    // Centers and beneficiaries
    CenterCreated(Uuid),
    CenterDeleted(Uuid),
    BeneficiaryRegistered(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel for the lifetime of the process. Runs as a
/// detached task spawned from main.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::TransferCreated { transfer_id, doc_no } => {
                info!(%transfer_id, %doc_no, "transfer created");
            }
            Event::TransferApproved { transfer_id, doc_no } => {
                info!(%transfer_id, %doc_no, "transfer approved");
            }
            Event::TransferRejected { transfer_id, doc_no } => {
                info!(%transfer_id, %doc_no, "transfer rejected");
            }
            Event::TransferCancelled { transfer_id, doc_no } => {
                info!(%transfer_id, %doc_no, "transfer cancelled");
            }
            Event::LowStock {
                product_id,
                name,
                quantity,
                min_level,
            } => {
                warn!(
                    %product_id,
                    name,
                    quantity,
                    min_level,
                    "stock at or below minimum level"
                );
            }
            Event::CenterCreated(id) => info!(center_id = %id, "center created"),
            Event::CenterDeleted(id) => info!(center_id = %id, "center deleted"),
            Event::BeneficiaryRegistered(id) => {
                info!(beneficiary_id = %id, "beneficiary registered");
            }
        }
    }

    info!("Event channel closed, stopping event processing loop");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_delivers_event() {
        let (tx, mut rx) = mpsc::channel(8);
        let sender = EventSender::new(tx);

        sender
            .send(Event::CenterCreated(Uuid::new_v4()))
            .await
            .unwrap();

        assert!(matches!(rx.recv().await, Some(Event::CenterCreated(_))));
    }

    #[tokio::test]
    async fn send_fails_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let sender = EventSender::new(tx);

        let result = sender.send(Event::CenterDeleted(Uuid::new_v4())).await;
        assert!(result.is_err());
    }
}
