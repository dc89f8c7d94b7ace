//! InMemoryTaskPool - 開発用のタスクプール
//!
//! # 学習ポイント
//! - RwLock による読み取り並行性（スナップショットは read lock 1 回で取る）
//! - compare-and-set による状態遷移（write lock 内で比較と書き込みを行う）

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{MatchError, Task, TaskId, TaskStatus};
use crate::ports::TaskPool;

/// InMemoryTaskPool はタスクを id で索引して保持
///
/// # 実装詳細
/// - `tasks`: 正本（TaskId -> Task）
/// - `order`: 取り込み順（list の出力順を安定させる）
#[derive(Default)]
pub struct InMemoryTaskPool {
    inner: RwLock<PoolState>,
}

#[derive(Default)]
struct PoolState {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl PoolState {
    fn collect(&self, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| keep(task))
            .cloned()
            .collect()
    }
}

impl InMemoryTaskPool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskPool for InMemoryTaskPool {
    async fn insert(&self, task: Task) -> Result<(), MatchError> {
        let mut state = self.inner.write().await;
        if state.tasks.contains_key(&task.id) {
            return Err(MatchError::DuplicateTask(task.id));
        }
        state.order.push(task.id.clone());
        state.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    async fn get(&self, task_id: &TaskId) -> Result<Task, MatchError> {
        self.inner
            .read()
            .await
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| MatchError::task_not_found(task_id))
    }

    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, MatchError> {
        let state = self.inner.read().await;
        Ok(state.collect(|task| task.status == status))
    }

    async fn list_all(&self) -> Result<Vec<Task>, MatchError> {
        let state = self.inner.read().await;
        Ok(state.collect(|_| true))
    }

    async fn compare_and_set_status(
        &self,
        task_id: &TaskId,
        expected: TaskStatus,
        new: TaskStatus,
    ) -> Result<bool, MatchError> {
        let mut state = self.inner.write().await;
        let task = state
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| MatchError::task_not_found(task_id))?;
        if task.status != expected {
            return Ok(false);
        }
        task.status = new;
        Ok(true)
    }
}
