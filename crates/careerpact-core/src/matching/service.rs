//! MatchingService - engine に入力を集めて渡す
//!
//! # フロー
//! 1. ProfileStore からプロフィール取得
//! 2. TaskPool から pending のスナップショット取得
//! 3. コーディネータから committed hours 取得
//! 4. MatchingEngine::rank（純粋関数）

use std::sync::Arc;
use tracing::debug;

use super::engine::MatchingEngine;
use crate::app::coordinator::AssignmentCoordinator;
use crate::domain::{MatchError, Task, TaskStatus, WorkerId};
use crate::ports::{Clock, ProfileStore, TaskPool};

pub struct MatchingService {
    engine: MatchingEngine,
    profiles: Arc<dyn ProfileStore>,
    pool: Arc<dyn TaskPool>,
    coordinator: Arc<AssignmentCoordinator>,
    clock: Arc<dyn Clock>,
}

impl MatchingService {
    pub fn new(
        engine: MatchingEngine,
        profiles: Arc<dyn ProfileStore>,
        pool: Arc<dyn TaskPool>,
        coordinator: Arc<AssignmentCoordinator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine,
            profiles,
            pool,
            coordinator,
            clock,
        }
    }

    /// Ranked offers for `worker_id` against the current pool.
    pub async fn offers_for(&self, worker_id: &WorkerId) -> Result<Vec<Task>, MatchError> {
        let profile = self.profiles.get(worker_id).await?;
        let snapshot = self.pool.list_by_status(TaskStatus::Pending).await?;
        let committed = self.coordinator.committed_hours(worker_id);

        let offers = self
            .engine
            .rank(&profile, &snapshot, committed, self.clock.now())?;
        debug!(
            %worker_id,
            pool = snapshot.len(),
            offers = offers.len(),
            committed,
            "offers ranked"
        );
        Ok(offers.into_iter().cloned().collect())
    }
}
