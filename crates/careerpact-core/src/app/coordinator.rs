//! AssignmentCoordinator - 受諾と状態遷移の直列化
//!
//! # ロック順序
//! task_id のロック → worker_id のロック（常にこの順）。
//! 異なるタスクへの操作は互いに待たない。
//!
//! # 保証
//! - 同じタスクへの同時 accept は高々 1 件だけ成功する（残りは `TaskUnavailable`）
//! - 同じワーカーの容量計算は直列化される（同時 accept で容量を過小評価しない）
//! - 失敗した accept は TaskPool にも台帳にも何も残さない
//! - バッジを発行できなかった完了は巻き戻す（completed のまま残らない）

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::badge_issuer::BadgeIssuer;
use super::ledger::{Commitment, CommitmentLedger};
use super::locks::KeyedLocks;
use crate::domain::{DigitalBadge, MatchError, Task, TaskId, TaskStatus, WorkerId};
use crate::ports::{Clock, ProfileStore, TaskPool};

/// Result of a status transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub task: Task,
    /// Present whenever the task ends up completed.
    pub badge: Option<DigitalBadge>,
    /// False for the idempotent repeat of a completion.
    pub changed: bool,
}

pub struct AssignmentCoordinator {
    profiles: Arc<dyn ProfileStore>,
    pool: Arc<dyn TaskPool>,
    issuer: Arc<BadgeIssuer>,
    clock: Arc<dyn Clock>,
    ledger: CommitmentLedger,
    task_locks: KeyedLocks<TaskId>,
    worker_locks: KeyedLocks<WorkerId>,
}

impl AssignmentCoordinator {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        pool: Arc<dyn TaskPool>,
        issuer: Arc<BadgeIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            profiles,
            pool,
            issuer,
            clock,
            ledger: CommitmentLedger::new(),
            task_locks: KeyedLocks::new(),
            worker_locks: KeyedLocks::new(),
        }
    }

    /// `pending → in_progress` for `worker_id`.
    ///
    /// # Errors
    /// - `NotFound`: task or profile missing
    /// - `TaskUnavailable`: task is not pending (or another worker won the race)
    /// - `InvalidProfile`: profile unusable for capacity accounting
    /// - `CapacityExceeded`: committed + estimated > weekly_hours
    pub async fn accept(&self, worker_id: &WorkerId, task_id: &TaskId) -> Result<Task, MatchError> {
        let _task_guard = self.task_locks.lock(task_id).await;

        let task = self.pool.get(task_id).await?;
        if !task.is_pending() {
            warn!(%worker_id, %task_id, status = %task.status, "accept lost: task unavailable");
            return Err(MatchError::TaskUnavailable {
                task_id: task_id.clone(),
                status: task.status,
            });
        }

        let profile = self.profiles.get(worker_id).await?;
        profile.validate()?;

        let _worker_guard = self.worker_locks.lock(worker_id).await;

        let committed = self.ledger.committed_hours(worker_id);
        if !profile.fits(committed, task.estimated_hours) {
            warn!(%worker_id, %task_id, committed, requested = task.estimated_hours, "accept refused: capacity");
            return Err(MatchError::CapacityExceeded {
                worker_id: worker_id.clone(),
                committed,
                requested: task.estimated_hours,
                weekly: profile.weekly_hours,
            });
        }

        let swapped = self
            .pool
            .compare_and_set_status(task_id, TaskStatus::Pending, TaskStatus::InProgress)
            .await?;
        if !swapped {
            // プール外から書き換えられた場合のみ到達する
            let current = self.pool.get(task_id).await?.status;
            warn!(%worker_id, %task_id, status = %current, "accept lost: status changed underneath");
            return Err(MatchError::TaskUnavailable {
                task_id: task_id.clone(),
                status: current,
            });
        }

        self.ledger.record(
            worker_id.clone(),
            task_id.clone(),
            task.estimated_hours,
            self.clock.now(),
        );
        info!(%worker_id, %task_id, hours = task.estimated_hours, "task accepted");

        Ok(Task {
            status: TaskStatus::InProgress,
            ..task
        })
    }

    /// Move a held task along the state machine.
    ///
    /// `pending → in_progress` is routed to [`accept`](Self::accept).
    /// Completing an already-completed task returns the existing badge.
    ///
    /// # Errors
    /// - `InvalidTransition`: not an edge of the state machine
    /// - `NotAssignee`: the task is held by someone else
    /// - `NotFound`: task missing
    /// - BadgeStore の失敗: completed への遷移は巻き戻してからそのエラーを返す
    pub async fn transition(
        &self,
        worker_id: &WorkerId,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> Result<TransitionOutcome, MatchError> {
        // accept は自分で task ロックを取るので、ここではロック前に振り分ける
        if new_status == TaskStatus::InProgress && self.pool.get(task_id).await?.is_pending() {
            let task = self.accept(worker_id, task_id).await?;
            return Ok(TransitionOutcome {
                task,
                badge: None,
                changed: true,
            });
        }

        let _task_guard = self.task_locks.lock(task_id).await;
        let task = self.pool.get(task_id).await?;

        let invalid = || MatchError::InvalidTransition {
            task_id: task_id.clone(),
            from: task.status,
            to: new_status,
        };

        match self.ledger.assignee(task_id) {
            Some(holder) if &holder == worker_id => {}
            Some(_) => {
                return Err(MatchError::NotAssignee {
                    task_id: task_id.clone(),
                    worker_id: worker_id.clone(),
                });
            }
            // 誰も受諾していない = pending のまま
            None => return Err(invalid()),
        }

        if task.status == TaskStatus::Completed && new_status == TaskStatus::Completed {
            debug!(%worker_id, %task_id, "repeat completion; returning existing badge");
            let badge = self.issuer.issue_for(&task).await?;
            return Ok(TransitionOutcome {
                task,
                badge: Some(badge),
                changed: false,
            });
        }

        if !task.status.can_transition_to(new_status) {
            return Err(invalid());
        }

        let _worker_guard = self.worker_locks.lock(worker_id).await;

        let swapped = self
            .pool
            .compare_and_set_status(task_id, task.status, new_status)
            .await?;
        if !swapped {
            let current = self.pool.get(task_id).await?.status;
            return Err(MatchError::TaskUnavailable {
                task_id: task_id.clone(),
                status: current,
            });
        }
        self.ledger.set_status(task_id, new_status);

        let previous = task.status;
        let task = Task {
            status: new_status,
            ..task
        };
        let badge = match new_status {
            TaskStatus::Completed => match self.issuer.issue_for(&task).await {
                Ok(badge) => Some(badge),
                Err(err) => {
                    self.roll_back(task_id, new_status, previous).await?;
                    warn!(%worker_id, %task_id, error = %err, "completion rolled back: badge not issued");
                    return Err(err);
                }
            },
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::SupportNeeded => None,
        };
        info!(%worker_id, %task_id, from = %previous, to = %new_status, "task transitioned");

        Ok(TransitionOutcome {
            task,
            badge,
            changed: true,
        })
    }

    /// Undo a transition whose follow-up failed. Callers hold the task and worker locks.
    async fn roll_back(
        &self,
        task_id: &TaskId,
        applied: TaskStatus,
        previous: TaskStatus,
    ) -> Result<(), MatchError> {
        self.pool
            .compare_and_set_status(task_id, applied, previous)
            .await?;
        self.ledger.set_status(task_id, previous);
        Ok(())
    }

    pub fn committed_hours(&self, worker_id: &WorkerId) -> f64 {
        self.ledger.committed_hours(worker_id)
    }

    pub fn assignee(&self, task_id: &TaskId) -> Option<WorkerId> {
        self.ledger.assignee(task_id)
    }

    pub fn commitments(&self, worker_id: &WorkerId) -> Vec<Commitment> {
        self.ledger.commitments(worker_id)
    }
}
