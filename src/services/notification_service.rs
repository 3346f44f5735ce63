use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::{
    errors::{AppError, AppResult},
    models::domain::QuizShare,
};

pub const QUIZ_CREATED: &str = "quiz_created";
pub const QUIZ_SHARED: &str = "quiz_shared";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: Value,
}

impl QuizEvent {
    pub fn quiz_created(quiz_id: &str, owner_id: &str, subject: &str) -> Self {
        Self {
            event_type: QUIZ_CREATED.to_string(),
            payload: json!({
                "quiz_id": quiz_id,
                "owner_id": owner_id,
                "subject": subject,
            }),
        }
    }

    pub fn quiz_shared(share: &QuizShare) -> Self {
        Self {
            event_type: QUIZ_SHARED.to_string(),
            payload: json!({
                "share_id": share.id,
                "quiz_id": share.quiz_id,
                "sender_id": share.sender_id,
                "receiver_id": share.receiver_id,
            }),
        }
    }
}

/// Best-effort event fan-out. Callers log failures and move on; nothing waits
/// for delivery.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Returns the number of subscribers the event reached.
    fn broadcast(&self, event: QuizEvent) -> AppResult<usize>;
}

pub struct BroadcastNotifier {
    sender: broadcast::Sender<QuizEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<QuizEvent> {
        self.sender.subscribe()
    }
}

impl Notifier for BroadcastNotifier {
    fn broadcast(&self, event: QuizEvent) -> AppResult<usize> {
        self.sender
            .send(event)
            .map_err(|e| AppError::InternalError(format!("no subscribers for {} event", e.0.event_type)))
    }
}

/// Logs every event until the channel closes.
pub fn spawn_event_logger(mut receiver: broadcast::Receiver<QuizEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => log::info!("event {}: {}", event.event_type, event.payload),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("Event logger lagged, {} events skipped", skipped)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_created_event_serializes_with_type_key() {
        let event = QuizEvent::quiz_created("q-1", "owner-1", "volcanoes");
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "quiz_created");
        assert_eq!(value["payload"]["quiz_id"], "q-1");
        assert_eq!(value["payload"]["owner_id"], "owner-1");
        assert_eq!(value["payload"]["subject"], "volcanoes");
    }

    #[test]
    fn quiz_shared_event_names_both_users() {
        let share = QuizShare::pending("alice", "bob", "q-9");
        let value = serde_json::to_value(QuizEvent::quiz_shared(&share)).unwrap();

        assert_eq!(value["type"], "quiz_shared");
        assert_eq!(value["payload"]["share_id"], share.id);
        assert_eq!(value["payload"]["sender_id"], "alice");
        assert_eq!(value["payload"]["receiver_id"], "bob");
    }

    #[tokio::test]
    async fn subscribers_receive_broadcast_events() {
        let notifier = BroadcastNotifier::new(4);
        let mut receiver = notifier.subscribe();

        let delivered = notifier
            .broadcast(QuizEvent::quiz_created("q-2", "owner-2", "fractions"))
            .unwrap();
        assert_eq!(delivered, 1);

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.payload["quiz_id"], "q-2");
    }

    #[test]
    fn broadcast_without_subscribers_is_an_error() {
        let notifier = BroadcastNotifier::new(4);
        let result = notifier.broadcast(QuizEvent::quiz_created("q-3", "o", "s"));
        assert!(result.is_err());
    }
}
