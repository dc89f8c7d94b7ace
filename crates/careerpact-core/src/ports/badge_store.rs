//! BadgeStore port - 発行済みバッジの KV ストア

use async_trait::async_trait;

use crate::domain::{DigitalBadge, MatchError, TaskId};

/// BadgeStore はバッジを保存
///
/// # 設計原則
/// - task_id ごとに高々 1 件（重複は `DuplicateBadge`）
/// - 保存後は不変
#[async_trait]
pub trait BadgeStore: Send + Sync {
    async fn put(&self, badge: DigitalBadge) -> Result<(), MatchError>;

    async fn get_by_task(&self, task_id: &TaskId) -> Result<Option<DigitalBadge>, MatchError>;

    /// 発行順
    async fn list(&self) -> Result<Vec<DigitalBadge>, MatchError>;
}
