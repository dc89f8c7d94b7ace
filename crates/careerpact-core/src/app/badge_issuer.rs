//! BadgeIssuer - 完了タスクからバッジへの 1:1 写像
//!
//! # 設計原則
//! - バッジ ID はタスク ID から決まる（`badge-<task_id>`）
//! - task_id について冪等（既存があればそれを返す）
//! - completed 以外のタスクには発行しない

use std::sync::Arc;
use tracing::info;

use crate::domain::{BadgeId, DigitalBadge, MatchError, Task, TaskId, TaskStatus};
use crate::ports::{BadgeStore, Clock};

pub struct BadgeIssuer {
    store: Arc<dyn BadgeStore>,
    clock: Arc<dyn Clock>,
    issuer_company: String,
}

impl BadgeIssuer {
    pub fn new(
        store: Arc<dyn BadgeStore>,
        clock: Arc<dyn Clock>,
        issuer_company: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            issuer_company: issuer_company.into(),
        }
    }

    /// 完了タスクのバッジを発行（既にあればそれを返す）
    ///
    /// # Errors
    /// - `TaskNotCompleted`: task.status != completed
    pub async fn issue_for(&self, task: &Task) -> Result<DigitalBadge, MatchError> {
        if task.status != TaskStatus::Completed {
            return Err(MatchError::TaskNotCompleted(task.id.clone()));
        }
        if let Some(existing) = self.store.get_by_task(&task.id).await? {
            return Ok(existing);
        }

        let badge = DigitalBadge {
            id: BadgeId::for_task(&task.id),
            title: task.title.clone(),
            description: format!("タスク「{}」を完了しました。", task.title),
            issued_date: self.clock.now(),
            issuer_company: self.issuer_company.clone(),
            task_id: task.id.clone(),
        };
        match self.store.put(badge.clone()).await {
            Ok(()) => {
                info!(badge_id = %badge.id, task_id = %task.id, "badge issued");
                Ok(badge)
            }
            // 同時発行に負けた場合は勝者のバッジを返す
            Err(MatchError::DuplicateBadge(_)) => self.badge_for_task(&task.id).await,
            Err(err) => Err(err),
        }
    }

    /// 外部で作られたバッジを登録（重複は `DuplicateBadge`）
    pub async fn register(&self, badge: DigitalBadge) -> Result<(), MatchError> {
        let task_id = badge.task_id.clone();
        self.store.put(badge).await?;
        info!(task_id = %task_id, "badge registered");
        Ok(())
    }

    pub async fn badge_for_task(&self, task_id: &TaskId) -> Result<DigitalBadge, MatchError> {
        self.store
            .get_by_task(task_id)
            .await?
            .ok_or_else(|| MatchError::badge_not_found(task_id))
    }

    pub async fn list(&self) -> Result<Vec<DigitalBadge>, MatchError> {
        self.store.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SkillType, TaskDraft};
    use crate::impls::InMemoryBadgeStore;
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    fn issuer() -> BadgeIssuer {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
        BadgeIssuer::new(Arc::new(InMemoryBadgeStore::new()), Arc::new(clock), "株式会社サンプル")
    }

    fn task(status: TaskStatus) -> Task {
        let deadline = Utc.with_ymd_and_hms(2024, 2, 15, 17, 0, 0).unwrap();
        let mut task = TaskDraft::new("商品説明文の作成", deadline, 2.0, [SkillType::Writing], 1)
            .into_task(TaskId::new("task_1"))
            .unwrap();
        task.status = status;
        task
    }

    #[tokio::test]
    async fn issues_badge_for_completed_task() {
        let issuer = issuer();
        let badge = issuer.issue_for(&task(TaskStatus::Completed)).await.unwrap();

        assert_eq!(badge.id.as_str(), "badge-task_1");
        assert_eq!(badge.task_id.as_str(), "task_1");
        assert_eq!(badge.issuer_company, "株式会社サンプル");
        assert_eq!(badge.issued_date, Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn issuing_twice_returns_same_badge() {
        let issuer = issuer();
        let first = issuer.issue_for(&task(TaskStatus::Completed)).await.unwrap();
        let second = issuer.issue_for(&task(TaskStatus::Completed)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(issuer.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn refuses_unfinished_tasks() {
        let issuer = issuer();
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::SupportNeeded] {
            let result = issuer.issue_for(&task(status)).await;
            assert!(matches!(result, Err(MatchError::TaskNotCompleted(_))));
        }
        assert!(issuer.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_badge_is_not_found() {
        let result = issuer().badge_for_task(&TaskId::new("task_9")).await;
        assert!(matches!(result, Err(MatchError::NotFound { entity: "badge", .. })));
    }
}
