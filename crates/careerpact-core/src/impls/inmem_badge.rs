//! InMemoryBadgeStore - 開発用のバッジストア

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{DigitalBadge, MatchError, TaskId};
use crate::ports::BadgeStore;

/// InMemoryBadgeStore は発行順の Vec と task_id 索引を持つ
#[derive(Default)]
pub struct InMemoryBadgeStore {
    inner: RwLock<BadgeState>,
}

#[derive(Default)]
struct BadgeState {
    badges: Vec<DigitalBadge>,
    by_task: HashMap<TaskId, usize>,
}

impl InMemoryBadgeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BadgeStore for InMemoryBadgeStore {
    async fn put(&self, badge: DigitalBadge) -> Result<(), MatchError> {
        let mut state = self.inner.write().await;
        if state.by_task.contains_key(&badge.task_id) {
            return Err(MatchError::DuplicateBadge(badge.task_id));
        }
        let index = state.badges.len();
        state.by_task.insert(badge.task_id.clone(), index);
        state.badges.push(badge);
        Ok(())
    }

    async fn get_by_task(&self, task_id: &TaskId) -> Result<Option<DigitalBadge>, MatchError> {
        let state = self.inner.read().await;
        Ok(state
            .by_task
            .get(task_id)
            .and_then(|&index| state.badges.get(index))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<DigitalBadge>, MatchError> {
        Ok(self.inner.read().await.badges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BadgeId;
    use chrono::Utc;

    fn badge(task: &str) -> DigitalBadge {
        let task_id = TaskId::new(task);
        DigitalBadge {
            id: BadgeId::for_task(&task_id),
            title: "t".into(),
            description: "d".into(),
            issued_date: Utc::now(),
            issuer_company: "CareerPact".into(),
            task_id,
        }
    }

    #[tokio::test]
    async fn put_list_and_lookup() {
        let store = InMemoryBadgeStore::new();
        store.put(badge("task_1")).await.unwrap();
        store.put(badge("task_2")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].task_id.as_str(), "task_1");

        let found = store.get_by_task(&TaskId::new("task_2")).await.unwrap();
        assert_eq!(found.map(|b| b.id.to_string()), Some("badge-task_2".to_string()));
        assert!(store.get_by_task(&TaskId::new("task_3")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_badge_for_same_task_is_rejected() {
        let store = InMemoryBadgeStore::new();
        store.put(badge("task_1")).await.unwrap();
        let result = store.put(badge("task_1")).await;
        assert!(matches!(result, Err(MatchError::DuplicateBadge(_))));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
