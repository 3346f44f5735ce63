use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    Pending,
    Accepted,
    Denied,
}

impl ShareStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareStatus::Pending => "pending",
            ShareStatus::Accepted => "accepted",
            ShareStatus::Denied => "denied",
        }
    }
}

/// A quiz offered by one user to another. Once accepted, the quiz shows up in
/// the receiver's shared list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizShare {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub quiz_id: String,
    pub status: ShareStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,
}

impl QuizShare {
    pub fn pending(sender_id: &str, receiver_id: &str, quiz_id: &str) -> Self {
        QuizShare {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            quiz_id: quiz_id.to_string(),
            status: ShareStatus::Pending,
            created_at: Some(Utc::now()),
            responded_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ShareStatus::Pending
    }
}
