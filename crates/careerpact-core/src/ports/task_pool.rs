//! TaskPool port - タスクの正本（source of truth）
//!
//! TaskPool は以下を管理します：
//! - タスク本体（不変のメタデータ）
//! - 状態（TaskStatus）
//!
//! # 設計原則
//! - 状態変更は `compare_and_set_status` のみ（期待値が一致した時だけ書き換える）
//! - `list_by_status` は一時点の一貫したスナップショットを返す
//! - 取り込み（insert）は外部プロセスの責務だが、開発用にここで受ける

use async_trait::async_trait;

use crate::domain::{MatchError, Task, TaskId, TaskStatus};

#[async_trait]
pub trait TaskPool: Send + Sync {
    /// 新規タスクを登録（ID 重複は `DuplicateTask`）
    async fn insert(&self, task: Task) -> Result<(), MatchError>;

    /// 見つからなければ `MatchError::NotFound`
    async fn get(&self, task_id: &TaskId) -> Result<Task, MatchError>;

    /// 指定状態のタスクのスナップショット
    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, MatchError>;

    async fn list_all(&self) -> Result<Vec<Task>, MatchError>;

    /// 現在の状態が `expected` の時だけ `new` に書き換える
    ///
    /// # Returns
    /// - `Ok(true)`: 書き換えた
    /// - `Ok(false)`: 状態が一致しなかった（何も変えていない）
    /// - `Err(NotFound)`: タスクが存在しない
    async fn compare_and_set_status(
        &self,
        task_id: &TaskId,
        expected: TaskStatus,
        new: TaskStatus,
    ) -> Result<bool, MatchError>;
}
