//! Failure-injecting store implementations for error-path tests.
//!
//! `FailingStores` wraps an `InMemoryStores` and delegates every call,
//! except for the operations it has been told to fail, which return
//! `AppError::Store`. Per-user failures on notification creation cover the
//! skip-and-continue fan-out paths.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    adapters::persistence::memory::InMemoryStores,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailingOp {
    EntryAdd,
    EntryQuery,
    EntryDelete,
    DecisionCreate,
    DecisionQueryByUser,
    DecisionQueryByStatus,
    DecisionQueryAcrossEvents,
    DecisionDelete,
    ProfileGet,
    ProfileReplace,
    ProfilePatch,
    NotificationCreate,
    NotificationList,
    NotificationPatch,
}

#[derive(Default)]
pub struct FailingStores {
    inner: InMemoryStores,
    failing_ops: HashSet<FailingOp>,
    failing_notification_users: Mutex<HashSet<String>>,
}

impl FailingStores {
    /// Fail a single operation; everything else behaves like the in-memory
    /// stores.
    pub fn new(op: FailingOp) -> Self {
        Self::with_ops([op])
    }

    pub fn with_ops(ops: impl IntoIterator<Item = FailingOp>) -> Self {
        Self {
            failing_ops: ops.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Seedable/inspectable backing stores.
    pub fn inner(&self) -> &InMemoryStores {
        &self.inner
    }

    /// Fail notification creation for one recipient only.
    pub fn fail_notification_create_for(&self, user_id: &str) {
        self.failing_notification_users
            .lock()
            .unwrap()
            .insert(user_id.to_string());
    }

    pub fn created_notifications(&self) -> Vec<Notification> {
        self.inner.all_notifications()
    }

    fn check(&self, op: FailingOp) -> AppResult<()> {
        if self.failing_ops.contains(&op) {
            return Err(AppError::Store(format!("injected failure: {:?}", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for FailingStores {
    async fn add(
        &self,
        event_id: &str,
        entry: NewWaitingListEntry,
    ) -> AppResult<WaitingListEntry> {
        self.check(FailingOp::EntryAdd)?;
        self.inner.add(event_id, entry).await
    }

    async fn query(&self, event_id: &str, entrant_id: &str) -> AppResult<Vec<WaitingListEntry>> {
        self.check(FailingOp::EntryQuery)?;
        EntryStore::query(&self.inner, event_id, entrant_id).await
    }

    async fn delete(&self, event_id: &str, entry_id: &str) -> AppResult<()> {
        self.check(FailingOp::EntryDelete)?;
        EntryStore::delete(&self.inner, event_id, entry_id).await
    }
}

#[async_trait]
impl DecisionStore for FailingStores {
    async fn create(&self, event_id: &str, decision: NewDecision) -> AppResult<Decision> {
        self.check(FailingOp::DecisionCreate)?;
        DecisionStore::create(&self.inner, event_id, decision).await
    }

    async fn query_by_user(&self, event_id: &str, entrant_id: &str) -> AppResult<Vec<Decision>> {
        self.check(FailingOp::DecisionQueryByUser)?;
        self.inner.query_by_user(event_id, entrant_id).await
    }

    async fn query_by_status(
        &self,
        event_id: &str,
        status: DecisionStatus,
    ) -> AppResult<Vec<Decision>> {
        self.check(FailingOp::DecisionQueryByStatus)?;
        self.inner.query_by_status(event_id, status).await
    }

    async fn query_across_events(&self, entrant_id: &str) -> AppResult<Vec<Decision>> {
        self.check(FailingOp::DecisionQueryAcrossEvents)?;
        self.inner.query_across_events(entrant_id).await
    }

    async fn delete(&self, event_id: &str, decision_id: &str) -> AppResult<()> {
        self.check(FailingOp::DecisionDelete)?;
        DecisionStore::delete(&self.inner, event_id, decision_id).await
    }
}

#[async_trait]
impl ProfileStore for FailingStores {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        self.check(FailingOp::ProfileGet)?;
        self.inner.get(user_id).await
    }

    async fn replace(&self, profile: &UserProfile) -> AppResult<()> {
        self.check(FailingOp::ProfileReplace)?;
        self.inner.replace(profile).await
    }

    async fn patch(&self, user_id: &str, patch: ProfilePatch) -> AppResult<()> {
        self.check(FailingOp::ProfilePatch)?;
        ProfileStore::patch(&self.inner, user_id, patch).await
    }
}

#[async_trait]
impl NotificationStore for FailingStores {
    async fn create(
        &self,
        user_id: &str,
        notification: NewNotification,
    ) -> AppResult<Notification> {
        self.check(FailingOp::NotificationCreate)?;
        if self
            .failing_notification_users
            .lock()
            .unwrap()
            .contains(user_id)
        {
            return Err(AppError::Store(format!(
                "injected failure creating notification for {}",
                user_id
            )));
        }
        NotificationStore::create(&self.inner, user_id, notification).await
    }

    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        self.check(FailingOp::NotificationList)?;
        self.inner.list_for_user(user_id).await
    }

    async fn patch(
        &self,
        user_id: &str,
        notification_id: &str,
        patch: NotificationPatch,
    ) -> AppResult<()> {
        self.check(FailingOp::NotificationPatch)?;
        NotificationStore::patch(&self.inner, user_id, notification_id, patch).await
    }
}
