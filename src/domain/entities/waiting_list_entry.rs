use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A user's request to be considered for an event, prior to any decision.
///
/// At most one live entry exists per (event_id, entrant_id) pair; created on
/// join, deleted on leave.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListEntry {
    pub id: String,
    pub event_id: String,
    pub entrant_id: String,
    pub joined_at: NaiveDateTime,
}

/// Fields for an entry about to be created; the store allocates the id.
#[derive(Debug, Clone)]
pub struct NewWaitingListEntry {
    pub event_id: String,
    pub entrant_id: String,
    pub joined_at: NaiveDateTime,
}
