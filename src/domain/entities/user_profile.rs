use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Per-user profile document.
///
/// `registered_event_ids` has set semantics; insertion order is irrelevant.
/// A missing `notification_opt_out` field means the user is opted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub registered_event_ids: BTreeSet<String>,
    #[serde(default)]
    pub notification_opt_out: bool,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Add an event to the registered set. Returns false if already present.
    pub fn register_event(&mut self, event_id: &str) -> bool {
        self.registered_event_ids.insert(event_id.to_string())
    }

    /// Remove an event from the registered set. Returns false if absent.
    pub fn unregister_event(&mut self, event_id: &str) -> bool {
        self.registered_event_ids.remove(event_id)
    }

    pub fn is_registered_for(&self, event_id: &str) -> bool {
        self.registered_event_ids.contains(event_id)
    }
}
