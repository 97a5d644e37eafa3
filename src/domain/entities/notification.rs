use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::decision::DecisionStatus;

/// What a notification is about. Mirrors the decision statuses, plus the
/// marker for an entrant promoted after another entrant declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Pending,
    Invited,
    Accepted,
    Declined,
    Lost,
    ReplacementSelected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Pending => "PENDING",
            NotificationKind::Invited => "INVITED",
            NotificationKind::Accepted => "ACCEPTED",
            NotificationKind::Declined => "DECLINED",
            NotificationKind::Lost => "LOST",
            NotificationKind::ReplacementSelected => "REPLACEMENT_SELECTED",
        }
    }
}

impl From<DecisionStatus> for NotificationKind {
    fn from(status: DecisionStatus) -> Self {
        match status {
            DecisionStatus::Pending => NotificationKind::Pending,
            DecisionStatus::Invited => NotificationKind::Invited,
            DecisionStatus::Accepted => NotificationKind::Accepted,
            DecisionStatus::Declined => NotificationKind::Declined,
            DecisionStatus::Lost => NotificationKind::Lost,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification document under the recipient user. Created only by the
/// dispatcher; the read flag is flipped by the UI through a narrow patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: NaiveDateTime,
}

/// Fields for a notification about to be created; the store allocates the id.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: String,
    pub event_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: NaiveDateTime,
}
