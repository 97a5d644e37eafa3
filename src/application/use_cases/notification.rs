use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, instrument, warn};

use crate::{
    app_error::AppResult,
    application::validators::require_id,
    domain::entities::{
        decision::DecisionStatus,
        notification::{NewNotification, Notification, NotificationKind},
    },
    use_cases::{profile::ProfileStore, waitlist::DecisionStore},
};

/// Narrow update for a notification document; the UI marks notifications
/// read through this instead of replacing the whole document.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub read: Option<bool>,
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Create a notification under the recipient; the store allocates the id.
    async fn create(&self, user_id: &str, notification: NewNotification)
    -> AppResult<Notification>;
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>>;
    async fn patch(
        &self,
        user_id: &str,
        notification_id: &str,
        patch: NotificationPatch,
    ) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    Success,
    Error,
}

/// Completed result of a batch dispatch. Batch callers always receive one of
/// these; the fan-out never surfaces an Err or panics into the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub status: DispatchStatus,
    /// Notifications actually written, not decisions scanned.
    pub count: usize,
    pub message: String,
}

impl DispatchSummary {
    fn success(count: usize, message: impl Into<String>) -> Self {
        Self {
            status: DispatchStatus::Success,
            count,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: DispatchStatus::Error,
            count: 0,
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct NotificationUseCases {
    decisions: Arc<dyn DecisionStore>,
    profiles: Arc<dyn ProfileStore>,
    notifications: Arc<dyn NotificationStore>,
    max_parallel_sends: usize,
}

impl NotificationUseCases {
    pub fn new(
        decisions: Arc<dyn DecisionStore>,
        profiles: Arc<dyn ProfileStore>,
        notifications: Arc<dyn NotificationStore>,
        max_parallel_sends: usize,
    ) -> Self {
        Self {
            decisions,
            profiles,
            notifications,
            max_parallel_sends: max_parallel_sends.max(1),
        }
    }

    /// Create a notification for one user, honoring the opt-out flag.
    ///
    /// A missing profile or an opted-out user resolves to `Ok(None)` with no
    /// write; only store failures surface as errors.
    #[instrument(skip(self, title, message))]
    pub async fn send_notification(
        &self,
        user_id: &str,
        event_id: &str,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> AppResult<Option<Notification>> {
        require_id(user_id, "userId")?;
        require_id(event_id, "eventId")?;
        send_one(
            self.profiles.clone(),
            self.notifications.clone(),
            user_id.to_string(),
            event_id.to_string(),
            kind,
            title.to_string(),
            message.to_string(),
        )
        .await
    }

    /// Fan a notification out to every entrant whose decision for the event
    /// has the given status.
    ///
    /// Infallible by contract: every failure becomes a structured summary.
    /// Per-entrant sends run as independent tasks, awaited together and
    /// bounded by a semaphore of `max_parallel_sends` permits; one entrant
    /// failing is skipped, never aborting the batch.
    #[instrument(skip(self, title, message))]
    pub async fn send_to_entrants_by_status(
        &self,
        event_id: &str,
        status: DecisionStatus,
        title: &str,
        message: &str,
    ) -> DispatchSummary {
        if require_id(event_id, "eventId").is_err() {
            return DispatchSummary::error("Failed to get decisions");
        }

        let decisions = match self.decisions.query_by_status(event_id, status).await {
            Ok(decisions) => decisions,
            Err(err) => {
                warn!(error = ?err, event_id, %status, "decision query failed");
                return DispatchSummary::error("Failed to get decisions");
            }
        };
        if decisions.is_empty() {
            debug!(event_id, %status, "no matching decisions");
            return DispatchSummary::success(0, "No entrants found");
        }

        let semaphore = Arc::new(Semaphore::new(self.max_parallel_sends));
        let mut tasks = JoinSet::new();
        for decision in decisions {
            let Some(entrant_id) = decision.entrant_id else {
                warn!(decision_id = %decision.id, event_id, "decision has no entrant id; skipping");
                continue;
            };

            let profiles = self.profiles.clone();
            let notifications = self.notifications.clone();
            let semaphore = semaphore.clone();
            let event_id = event_id.to_string();
            let kind = NotificationKind::from(status);
            let title = title.to_string();
            let message = message.to_string();
            tasks.spawn(async move {
                // Holds the permit for the whole profile-read + write pair.
                let _permit = semaphore.acquire_owned().await;
                let sent = send_one(
                    profiles,
                    notifications,
                    entrant_id.clone(),
                    event_id,
                    kind,
                    title,
                    message,
                )
                .await;
                (entrant_id, sent)
            });
        }

        let mut count = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(Some(_)))) => count += 1,
                Ok((entrant_id, Ok(None))) => {
                    debug!(
                        entrant_id = %entrant_id,
                        "no notification written (opted out or no profile)"
                    );
                }
                Ok((entrant_id, Err(err))) => {
                    warn!(error = ?err, entrant_id = %entrant_id, "per-entrant send failed; skipping");
                }
                Err(err) => {
                    warn!(error = ?err, "send task did not complete; skipping");
                }
            }
        }

        DispatchSummary::success(count, format!("Sent {} notifications", count))
    }

    /// Mark a notification read without touching its other fields.
    pub async fn mark_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        require_id(user_id, "userId")?;
        require_id(notification_id, "notificationId")?;
        self.notifications
            .patch(user_id, notification_id, NotificationPatch { read: Some(true) })
            .await
    }
}

/// One opt-out-aware send. Free function over owned handles so the fan-out
/// can run it inside spawned tasks.
async fn send_one(
    profiles: Arc<dyn ProfileStore>,
    notifications: Arc<dyn NotificationStore>,
    user_id: String,
    event_id: String,
    kind: NotificationKind,
    title: String,
    message: String,
) -> AppResult<Option<Notification>> {
    let Some(profile) = profiles.get(&user_id).await? else {
        debug!(user_id = %user_id, "no profile; skipping notification");
        return Ok(None);
    };
    if profile.notification_opt_out {
        debug!(user_id = %user_id, "user opted out of notifications");
        return Ok(None);
    }

    let notification = notifications
        .create(
            &user_id,
            NewNotification {
                user_id: user_id.clone(),
                event_id,
                kind,
                title,
                message,
                read: false,
                created_at: Utc::now().naive_utc(),
            },
        )
        .await?;
    Ok(Some(notification))
}
