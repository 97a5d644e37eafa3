use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Selection status for a (event, entrant) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionStatus {
    Pending,
    Invited,
    Accepted,
    Declined,
    Lost,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "PENDING",
            DecisionStatus::Invited => "INVITED",
            DecisionStatus::Accepted => "ACCEPTED",
            DecisionStatus::Declined => "DECLINED",
            DecisionStatus::Lost => "LOST",
        }
    }

    /// Check if this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionStatus::Accepted | DecisionStatus::Lost)
    }

    /// Valid transitions: PENDING -> INVITED -> {ACCEPTED, DECLINED};
    /// INVITED or DECLINED may later move to LOST.
    pub fn can_transition_to(&self, next: DecisionStatus) -> bool {
        matches!(
            (self, next),
            (DecisionStatus::Pending, DecisionStatus::Invited)
                | (DecisionStatus::Invited, DecisionStatus::Accepted)
                | (DecisionStatus::Invited, DecisionStatus::Declined)
                | (DecisionStatus::Invited, DecisionStatus::Lost)
                | (DecisionStatus::Declined, DecisionStatus::Lost)
        )
    }
}

impl Default for DecisionStatus {
    fn default() -> Self {
        DecisionStatus::Pending
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(DecisionStatus::Pending),
            "INVITED" => Ok(DecisionStatus::Invited),
            "ACCEPTED" => Ok(DecisionStatus::Accepted),
            "DECLINED" => Ok(DecisionStatus::Declined),
            "LOST" => Ok(DecisionStatus::Lost),
            _ => Err(format!("Invalid decision status: {}", s)),
        }
    }
}

/// Per-(event, entrant) record tracking the selection outcome.
///
/// At most one decision exists per (event_id, entrant_id) pair; it is created
/// together with the waiting-list entry in state PENDING and deleted on leave.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub event_id: String,
    /// Absent on records written before the entrant id was made mandatory.
    /// Fan-out skips decisions without one.
    #[serde(default)]
    pub entrant_id: Option<String>,
    pub status: DecisionStatus,
    pub created_at: NaiveDateTime,
}

/// Fields for a decision about to be created; the store allocates the id.
#[derive(Debug, Clone)]
pub struct NewDecision {
    pub event_id: String,
    pub entrant_id: String,
    pub status: DecisionStatus,
    pub created_at: NaiveDateTime,
}

/// Migration shim for decisions addressed as
/// `events/{eventId}/decisions/{decisionId}` before `event_id` was stored on
/// the record itself. New code reads `Decision::event_id` directly.
pub fn event_id_from_path(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some("events"), Some(event_id), Some("decisions"), Some(_), None)
            if !event_id.is_empty() =>
        {
            Some(event_id)
        }
        _ => None,
    }
}
