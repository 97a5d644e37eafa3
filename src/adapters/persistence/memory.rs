//! In-memory implementation of the four store contracts.
//!
//! The real application binds these traits to a hosted document database;
//! this adapter keeps everything in process for tests, demos, and local
//! development. Deletes follow document-store semantics: deleting an absent
//! id succeeds.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::{
        decision::{Decision, DecisionStatus, NewDecision},
        notification::{NewNotification, Notification},
        user_profile::UserProfile,
        waiting_list_entry::{NewWaitingListEntry, WaitingListEntry},
    },
    use_cases::{
        notification::{NotificationPatch, NotificationStore},
        profile::{ProfilePatch, ProfileStore},
        waitlist::{DecisionStore, EntryStore},
    },
};

#[derive(Default)]
pub struct InMemoryStores {
    /// event_id -> entries under events/{eventId}/waitingList
    entries: Mutex<HashMap<String, Vec<WaitingListEntry>>>,
    /// event_id -> decisions under events/{eventId}/decisions
    decisions: Mutex<HashMap<String, Vec<Decision>>>,
    profiles: Mutex<HashMap<String, UserProfile>>,
    /// user_id -> notifications under users/{userId}/notifications
    notifications: Mutex<HashMap<String, Vec<Notification>>>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        let stores = Self::default();
        for profile in profiles {
            stores.seed_profile(profile);
        }
        stores
    }

    pub fn seed_profile(&self, profile: UserProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile);
    }

    pub fn seed_decision(&self, decision: Decision) {
        self.decisions
            .lock()
            .unwrap()
            .entry(decision.event_id.clone())
            .or_default()
            .push(decision);
    }

    pub fn seed_entry(&self, entry: WaitingListEntry) {
        self.entries
            .lock()
            .unwrap()
            .entry(entry.event_id.clone())
            .or_default()
            .push(entry);
    }

    // Inspection helpers for assertions.

    pub fn entries_for_event(&self, event_id: &str) -> Vec<WaitingListEntry> {
        self.entries
            .lock()
            .unwrap()
            .get(event_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn decisions_for_event(&self, event_id: &str) -> Vec<Decision> {
        self.decisions
            .lock()
            .unwrap()
            .get(event_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.lock().unwrap().get(user_id).cloned()
    }

    pub fn notifications_for_user(&self, user_id: &str) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn all_notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .values()
            .flatten()
            .cloned()
            .collect()
    }

    fn allocate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl EntryStore for InMemoryStores {
    async fn add(
        &self,
        event_id: &str,
        entry: NewWaitingListEntry,
    ) -> AppResult<WaitingListEntry> {
        let created = WaitingListEntry {
            id: Self::allocate_id(),
            event_id: entry.event_id,
            entrant_id: entry.entrant_id,
            joined_at: entry.joined_at,
        };
        self.entries
            .lock()
            .unwrap()
            .entry(event_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn query(&self, event_id: &str, entrant_id: &str) -> AppResult<Vec<WaitingListEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(event_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.entrant_id == entrant_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, event_id: &str, entry_id: &str) -> AppResult<()> {
        if let Some(entries) = self.entries.lock().unwrap().get_mut(event_id) {
            entries.retain(|e| e.id != entry_id);
        }
        Ok(())
    }
}

#[async_trait]
impl DecisionStore for InMemoryStores {
    async fn create(&self, event_id: &str, decision: NewDecision) -> AppResult<Decision> {
        let created = Decision {
            id: Self::allocate_id(),
            event_id: decision.event_id,
            entrant_id: Some(decision.entrant_id),
            status: decision.status,
            created_at: decision.created_at,
        };
        self.decisions
            .lock()
            .unwrap()
            .entry(event_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn query_by_user(&self, event_id: &str, entrant_id: &str) -> AppResult<Vec<Decision>> {
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .get(event_id)
            .map(|decisions| {
                decisions
                    .iter()
                    .filter(|d| d.entrant_id.as_deref() == Some(entrant_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query_by_status(
        &self,
        event_id: &str,
        status: DecisionStatus,
    ) -> AppResult<Vec<Decision>> {
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .get(event_id)
            .map(|decisions| {
                decisions
                    .iter()
                    .filter(|d| d.status == status)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn query_across_events(&self, entrant_id: &str) -> AppResult<Vec<Decision>> {
        // Collection-group semantics: every decisions subcollection, all
        // events.
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .values()
            .flatten()
            .filter(|d| d.entrant_id.as_deref() == Some(entrant_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, event_id: &str, decision_id: &str) -> AppResult<()> {
        if let Some(decisions) = self.decisions.lock().unwrap().get_mut(event_id) {
            decisions.retain(|d| d.id != decision_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryStores {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }

    async fn replace(&self, profile: &UserProfile) -> AppResult<()> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn patch(&self, user_id: &str, patch: ProfilePatch) -> AppResult<()> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .entry(user_id.to_string())
            .or_insert_with(|| UserProfile::new(user_id));
        if let Some(events) = patch.registered_event_ids {
            profile.registered_event_ids = events;
        }
        if let Some(opt_out) = patch.notification_opt_out {
            profile.notification_opt_out = opt_out;
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for InMemoryStores {
    async fn create(
        &self,
        user_id: &str,
        notification: NewNotification,
    ) -> AppResult<Notification> {
        let created = Notification {
            id: Self::allocate_id(),
            user_id: notification.user_id,
            event_id: notification.event_id,
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            read: notification.read,
            created_at: notification.created_at,
        };
        self.notifications
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        Ok(self.notifications_for_user(user_id))
    }

    async fn patch(
        &self,
        user_id: &str,
        notification_id: &str,
        patch: NotificationPatch,
    ) -> AppResult<()> {
        let mut notifications = self.notifications.lock().unwrap();
        let notification = notifications
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|n| n.id == notification_id))
            .ok_or(AppError::NotFound)?;
        if let Some(read) = patch.read {
            notification.read = read;
        }
        Ok(())
    }
}
