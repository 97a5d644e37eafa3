//! Test data factories for creating valid fixtures.
//!
//! Each factory creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::entities::{
    decision::{Decision, DecisionStatus},
    user_profile::UserProfile,
    waiting_list_entry::WaitingListEntry,
};

/// Create a test profile with sensible defaults.
pub fn create_test_profile(
    user_id: &str,
    overrides: impl FnOnce(&mut UserProfile),
) -> UserProfile {
    let mut profile = UserProfile::new(user_id);
    overrides(&mut profile);
    profile
}

/// Create a test decision with sensible defaults.
pub fn create_test_decision(
    event_id: &str,
    overrides: impl FnOnce(&mut Decision),
) -> Decision {
    let mut decision = Decision {
        id: Uuid::new_v4().to_string(),
        event_id: event_id.to_string(),
        entrant_id: Some("entrant-1".to_string()),
        status: DecisionStatus::Pending,
        created_at: test_datetime(),
    };
    overrides(&mut decision);
    decision
}

/// Create a test waiting-list entry with sensible defaults.
pub fn create_test_entry(
    event_id: &str,
    entrant_id: &str,
    overrides: impl FnOnce(&mut WaitingListEntry),
) -> WaitingListEntry {
    let mut entry = WaitingListEntry {
        id: Uuid::new_v4().to_string(),
        event_id: event_id.to_string(),
        entrant_id: entrant_id.to_string(),
        joined_at: test_datetime(),
    };
    overrides(&mut entry);
    entry
}

/// A fixed timestamp so assertions never depend on the wall clock.
pub fn test_datetime() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(1_736_935_200, 0)
        .unwrap()
        .naive_utc()
}
