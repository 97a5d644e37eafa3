use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::{app_error::AppResult, domain::entities::user_profile::UserProfile};

/// Narrow field update for a profile document. `None` fields are left
/// untouched by the store, so a patch never clobbers unrelated concurrent
/// writes the way a full replace would.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub registered_event_ids: Option<BTreeSet<String>>,
    pub notification_opt_out: Option<bool>,
}

impl ProfilePatch {
    pub fn registered_events(events: BTreeSet<String>) -> Self {
        Self {
            registered_event_ids: Some(events),
            ..Default::default()
        }
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &str) -> AppResult<Option<UserProfile>>;
    /// Full document write; overwrites every field.
    async fn replace(&self, profile: &UserProfile) -> AppResult<()>;
    /// Partial write of only the fields set on the patch. Creates the
    /// document if it does not exist.
    async fn patch(&self, user_id: &str, patch: ProfilePatch) -> AppResult<()>;
}
