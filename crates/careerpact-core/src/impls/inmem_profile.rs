//! InMemoryProfileStore - 開発用のプロフィールストア

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{MatchError, UserProfile, WorkerId};
use crate::ports::ProfileStore;

/// InMemoryProfileStore は HashMap<WorkerId, UserProfile> を RwLock で保護
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<WorkerId, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, worker_id: &WorkerId) -> Result<UserProfile, MatchError> {
        self.profiles
            .read()
            .await
            .get(worker_id)
            .cloned()
            .ok_or_else(|| MatchError::profile_not_found(worker_id))
    }

    async fn put(&self, worker_id: WorkerId, profile: UserProfile) -> Result<(), MatchError> {
        self.profiles.write().await.insert(worker_id, profile);
        Ok(())
    }
}
