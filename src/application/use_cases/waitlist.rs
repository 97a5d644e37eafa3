use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    app_error::AppResult,
    application::validators::require_id,
    domain::entities::{
        decision::{Decision, DecisionStatus, NewDecision},
        user_profile::UserProfile,
        waiting_list_entry::{NewWaitingListEntry, WaitingListEntry},
    },
    use_cases::profile::{ProfilePatch, ProfileStore},
};

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Create an entry under the event; the store allocates the id.
    async fn add(&self, event_id: &str, entry: NewWaitingListEntry)
    -> AppResult<WaitingListEntry>;
    async fn query(&self, event_id: &str, entrant_id: &str) -> AppResult<Vec<WaitingListEntry>>;
    async fn delete(&self, event_id: &str, entry_id: &str) -> AppResult<()>;
}

#[async_trait]
pub trait DecisionStore: Send + Sync {
    async fn create(&self, event_id: &str, decision: NewDecision) -> AppResult<Decision>;
    async fn query_by_user(&self, event_id: &str, entrant_id: &str) -> AppResult<Vec<Decision>>;
    async fn query_by_status(
        &self,
        event_id: &str,
        status: DecisionStatus,
    ) -> AppResult<Vec<Decision>>;
    /// Collection-group query: the entrant's decisions across every event.
    async fn query_across_events(&self, entrant_id: &str) -> AppResult<Vec<Decision>>;
    async fn delete(&self, event_id: &str, decision_id: &str) -> AppResult<()>;
}

/// Outcome of a join request. Serializes with a `status` tag so the UI sees
/// `"success"` or `"already_exists"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JoinOutcome {
    AlreadyExists,
    #[serde(rename_all = "camelCase")]
    Success {
        entry_id: String,
        decision_id: String,
    },
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    entries: Arc<dyn EntryStore>,
    decisions: Arc<dyn DecisionStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl WaitlistUseCases {
    pub fn new(
        entries: Arc<dyn EntryStore>,
        decisions: Arc<dyn DecisionStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            entries,
            decisions,
            profiles,
        }
    }

    /// Put an entrant on the event's waiting list.
    ///
    /// Creates the entry and its paired PENDING decision, then adds the event
    /// to the profile's registered set. Idempotent: an existing entry for the
    /// pair returns `AlreadyExists` without side effects, which is also the
    /// recovery path after a crash between the non-transactional steps.
    #[instrument(skip(self))]
    pub async fn join(&self, event_id: &str, entrant_id: &str) -> AppResult<JoinOutcome> {
        require_id(event_id, "eventId")?;
        require_id(entrant_id, "entrantId")?;

        let existing = self.entries.query(event_id, entrant_id).await?;
        if !existing.is_empty() {
            debug!(event_id, entrant_id, "entrant already on waiting list");
            return Ok(JoinOutcome::AlreadyExists);
        }

        let now = Utc::now().naive_utc();
        let entry = self
            .entries
            .add(
                event_id,
                NewWaitingListEntry {
                    event_id: event_id.to_string(),
                    entrant_id: entrant_id.to_string(),
                    joined_at: now,
                },
            )
            .await?;
        let decision = self
            .decisions
            .create(
                event_id,
                NewDecision {
                    event_id: event_id.to_string(),
                    entrant_id: entrant_id.to_string(),
                    status: DecisionStatus::Pending,
                    created_at: now,
                },
            )
            .await?;

        let mut profile = self
            .profiles
            .get(entrant_id)
            .await?
            .unwrap_or_else(|| UserProfile::new(entrant_id));
        if profile.register_event(event_id) {
            self.profiles
                .patch(
                    entrant_id,
                    ProfilePatch::registered_events(profile.registered_event_ids),
                )
                .await?;
        }

        Ok(JoinOutcome::Success {
            entry_id: entry.id,
            decision_id: decision.id,
        })
    }

    /// Take an entrant off the event's waiting list.
    ///
    /// Deletes the decision (looked up when no id is supplied; absence is a
    /// no-op), deletes the entry, and removes the event from the profile's
    /// registered set. Each step is an independent call; re-invoking after a
    /// partial failure converges on the same end state.
    #[instrument(skip(self))]
    pub async fn leave(
        &self,
        event_id: &str,
        entrant_id: &str,
        entry_id: &str,
        decision_id: Option<&str>,
    ) -> AppResult<()> {
        require_id(event_id, "eventId")?;
        require_id(entrant_id, "entrantId")?;
        require_id(entry_id, "entryId")?;

        let decision_id = match decision_id {
            Some(id) => Some(id.to_string()),
            None => self
                .decisions
                .query_by_user(event_id, entrant_id)
                .await?
                .into_iter()
                .next()
                .map(|d| d.id),
        };
        match decision_id {
            Some(id) => self.decisions.delete(event_id, &id).await?,
            None => debug!(event_id, entrant_id, "no decision to delete"),
        }

        self.entries.delete(event_id, entry_id).await?;

        if let Some(mut profile) = self.profiles.get(entrant_id).await? {
            if profile.unregister_event(event_id) {
                self.profiles
                    .patch(
                        entrant_id,
                        ProfilePatch::registered_events(profile.registered_event_ids),
                    )
                    .await?;
            }
        }

        Ok(())
    }

    /// The entrant's decisions across every event, for the "my events" view.
    #[instrument(skip(self))]
    pub async fn decisions_for_entrant(&self, entrant_id: &str) -> AppResult<Vec<Decision>> {
        require_id(entrant_id, "entrantId")?;
        self.decisions.query_across_events(entrant_id).await
    }
}
