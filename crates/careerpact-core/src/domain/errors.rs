//! Errors - エラー型と分類
//!
//! 呼び出し側が「別のタスクを選ぶ」のか「入力を直す」のかを
//! `ErrorKind` で判別できるようにします。

use crate::domain::ids::{TaskId, WorkerId};
use crate::domain::status::TaskStatus;

/// ErrorKind は失敗の運用分類
///
/// - TryAnotherTask: 競合に負けた / 容量不足（別タスクを選ぶ or 後で再試行）
/// - FixInput: 入力の誤り（プロフィールや遷移要求を直す）
/// - Missing: 参照先が存在しない
/// - Invariant: 内部不変条件の違反（コーディネータ経由では到達しない）
/// - Infrastructure: ストア実装の障害（同じ要求をそのまま再試行できる）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TryAnotherTask,
    FixInput,
    Missing,
    Invariant,
    Infrastructure,
}

/// MatchError はマッチング・割り当て・バッジ発行のドメインエラー
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("invalid task {task_id}: {reason}")]
    InvalidTask { task_id: TaskId, reason: String },

    #[error("task {task_id} is unavailable (status={status})")]
    TaskUnavailable { task_id: TaskId, status: TaskStatus },

    #[error(
        "capacity exceeded for {worker_id}: committed={committed}h + requested={requested}h > weekly={weekly}h"
    )]
    CapacityExceeded {
        worker_id: WorkerId,
        committed: f64,
        requested: f64,
        weekly: i32,
    },

    #[error("invalid transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("task {task_id} is held by another worker, not {worker_id}")]
    NotAssignee { task_id: TaskId, worker_id: WorkerId },

    #[error("task {0} is not completed; badge cannot be issued")]
    TaskNotCompleted(TaskId),

    #[error("task {0} already exists")]
    DuplicateTask(TaskId),

    #[error("a badge for task {0} already exists")]
    DuplicateBadge(TaskId),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl MatchError {
    pub fn profile_not_found(worker_id: &WorkerId) -> Self {
        MatchError::NotFound {
            entity: "profile",
            id: worker_id.to_string(),
        }
    }

    pub fn task_not_found(task_id: &TaskId) -> Self {
        MatchError::NotFound {
            entity: "task",
            id: task_id.to_string(),
        }
    }

    pub fn badge_not_found(task_id: &TaskId) -> Self {
        MatchError::NotFound {
            entity: "badge",
            id: task_id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::TaskUnavailable { .. } | MatchError::CapacityExceeded { .. } => {
                ErrorKind::TryAnotherTask
            }
            MatchError::InvalidProfile(_)
            | MatchError::InvalidTask { .. }
            | MatchError::InvalidTransition { .. }
            | MatchError::NotAssignee { .. }
            | MatchError::DuplicateTask(_)
            | MatchError::DuplicateBadge(_) => ErrorKind::FixInput,
            MatchError::NotFound { .. } => ErrorKind::Missing,
            MatchError::TaskNotCompleted(_) => ErrorKind::Invariant,
            MatchError::Storage(_) => ErrorKind::Infrastructure,
        }
    }

    /// 呼び出し側が別タスクを選べば解決しうるか
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::TryAnotherTask
    }
}
