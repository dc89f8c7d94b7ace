//! CommitmentLedger - 誰がどのタスクを何時間抱えているか
//!
//! 容量計算（committed hours）と担当者の照会に使います。
//! 書き込みはコーディネータが task / worker のロックを取った状態で行います。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::{TaskId, TaskStatus, WorkerId};

/// One accepted task held by a worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub worker_id: WorkerId,
    pub task_id: TaskId,
    pub hours: f64,
    /// Mirrors the task status since acceptance.
    pub status: TaskStatus,
    pub accepted_at: DateTime<Utc>,
}

impl Commitment {
    pub fn holds_capacity(&self) -> bool {
        self.status.holds_capacity()
    }
}

#[derive(Default)]
struct LedgerState {
    by_task: HashMap<TaskId, Commitment>,
    by_worker: HashMap<WorkerId, Vec<TaskId>>,
}

/// CommitmentLedger は (worker_id, task_id) の割り当て索引
#[derive(Default)]
pub struct CommitmentLedger {
    state: Mutex<LedgerState>,
}

impl CommitmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a fresh acceptance (status = in_progress).
    pub fn record(&self, worker_id: WorkerId, task_id: TaskId, hours: f64, at: DateTime<Utc>) {
        let mut state = self.state();
        state
            .by_worker
            .entry(worker_id.clone())
            .or_default()
            .push(task_id.clone());
        state.by_task.insert(
            task_id.clone(),
            Commitment {
                worker_id,
                task_id,
                hours,
                status: TaskStatus::InProgress,
                accepted_at: at,
            },
        );
    }

    /// Follow a status transition. Completed commitments stop holding capacity.
    pub fn set_status(&self, task_id: &TaskId, status: TaskStatus) {
        if let Some(commitment) = self.state().by_task.get_mut(task_id) {
            commitment.status = status;
        }
    }

    pub fn assignee(&self, task_id: &TaskId) -> Option<WorkerId> {
        self.state()
            .by_task
            .get(task_id)
            .map(|commitment| commitment.worker_id.clone())
    }

    /// Hours of in_progress / support_needed tasks held by `worker_id`.
    pub fn committed_hours(&self, worker_id: &WorkerId) -> f64 {
        self.commitments(worker_id)
            .iter()
            .filter(|commitment| commitment.holds_capacity())
            .fold(0.0, |total, commitment| total + commitment.hours)
    }

    /// Every commitment of `worker_id`, in acceptance order.
    pub fn commitments(&self, worker_id: &WorkerId) -> Vec<Commitment> {
        let state = self.state();
        state
            .by_worker
            .get(worker_id)
            .map(|task_ids| {
                task_ids
                    .iter()
                    .filter_map(|task_id| state.by_task.get(task_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_hours_sum_active_commitments() {
        let ledger = CommitmentLedger::new();
        let worker = WorkerId::new("w");
        let now = Utc::now();
        ledger.record(worker.clone(), TaskId::new("a"), 1.5, now);
        ledger.record(worker.clone(), TaskId::new("b"), 2.0, now);
        ledger.record(WorkerId::new("other"), TaskId::new("c"), 4.0, now);

        assert_eq!(ledger.committed_hours(&worker), 3.5);

        ledger.set_status(&TaskId::new("b"), TaskStatus::SupportNeeded);
        assert_eq!(ledger.committed_hours(&worker), 3.5);

        ledger.set_status(&TaskId::new("a"), TaskStatus::Completed);
        assert_eq!(ledger.committed_hours(&worker), 2.0);
    }

    #[test]
    fn no_active_commitments_is_positive_zero() {
        let ledger = CommitmentLedger::new();
        let worker = WorkerId::new("w");
        assert!(ledger.committed_hours(&worker).is_sign_positive());

        ledger.record(worker.clone(), TaskId::new("a"), 1.0, Utc::now());
        ledger.set_status(&TaskId::new("a"), TaskStatus::Completed);
        let committed = ledger.committed_hours(&worker);
        assert_eq!(committed, 0.0);
        assert!(committed.is_sign_positive());
        assert_eq!(committed.to_string(), "0");
    }

    #[test]
    fn assignee_and_commitments() {
        let ledger = CommitmentLedger::new();
        let worker = WorkerId::new("w");
        ledger.record(worker.clone(), TaskId::new("a"), 1.0, Utc::now());

        assert_eq!(ledger.assignee(&TaskId::new("a")), Some(worker.clone()));
        assert_eq!(ledger.assignee(&TaskId::new("b")), None);
        assert_eq!(ledger.commitments(&worker).len(), 1);
        assert!(ledger.commitments(&WorkerId::new("nobody")).is_empty());
    }
}
