//! Task - マイクロタスクと取り込み用ドラフト
//!
//! `Task` は TaskPool が所有し、状態はコーディネータ経由でのみ変わります。
//! `TaskDraft` は取り込み側が渡す入力で、ID は省略可能です。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::errors::MatchError;
use super::ids::TaskId;
use super::skill::SkillType;
use super::status::TaskStatus;

/// Task はプールに置かれる 1 件のマイクロタスク
///
/// # 優先度
/// `priority` は数値が小さいほど緊急（1 が最優先）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub estimated_hours: f64,
    pub required_skills: BTreeSet<SkillType>,
    pub priority: i32,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
}

fn default_status() -> TaskStatus {
    TaskStatus::Pending
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.deadline > now
    }
}

/// TaskDraft は取り込み処理からの入力
///
/// `id` がなければ `IdGenerator` が払い出します。
/// 取り込まれたタスクは常に `pending` から始まります。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    #[serde(default)]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub estimated_hours: f64,
    pub required_skills: BTreeSet<SkillType>,
    pub priority: i32,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        deadline: DateTime<Utc>,
        estimated_hours: f64,
        required_skills: impl IntoIterator<Item = SkillType>,
        priority: i32,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            deadline,
            estimated_hours,
            required_skills: required_skills.into_iter().collect(),
            priority,
        }
    }

    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 検証して `pending` の Task にする
    ///
    /// # 検証
    /// - required_skills が空でない
    /// - estimated_hours が正の有限値
    pub fn into_task(self, id: TaskId) -> Result<Task, MatchError> {
        if self.required_skills.is_empty() {
            return Err(MatchError::InvalidTask {
                task_id: id,
                reason: "required_skills must not be empty".into(),
            });
        }
        if !self.estimated_hours.is_finite() || self.estimated_hours <= 0.0 {
            return Err(MatchError::InvalidTask {
                task_id: id,
                reason: format!(
                    "estimated_hours must be positive (got {})",
                    self.estimated_hours
                ),
            });
        }
        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            deadline: self.deadline,
            estimated_hours: self.estimated_hours,
            required_skills: self.required_skills,
            priority: self.priority,
            status: TaskStatus::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 15, 17, 0, 0).unwrap()
    }

    #[test]
    fn draft_becomes_pending_task() {
        let task = TaskDraft::new("商品説明文の作成", deadline(), 2.0, [SkillType::Writing], 1)
            .with_description("ECサイトの商品説明文を10件作成してください")
            .into_task(TaskId::new("task_1"))
            .unwrap();

        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.id.as_str(), "task_1");
        assert!(task.required_skills.contains(&SkillType::Writing));
    }

    #[test]
    fn draft_without_skills_is_rejected() {
        let result = TaskDraft::new("x", deadline(), 1.0, [], 1).into_task(TaskId::new("t"));
        assert!(matches!(result, Err(MatchError::InvalidTask { .. })));
    }

    #[test]
    fn draft_with_non_positive_hours_is_rejected() {
        for hours in [0.0, -1.0, f64::NAN] {
            let result =
                TaskDraft::new("x", deadline(), hours, [SkillType::Design], 1).into_task(TaskId::new("t"));
            assert!(matches!(result, Err(MatchError::InvalidTask { .. })));
        }
    }

    #[test]
    fn task_without_status_defaults_to_pending() {
        let json = r#"
        {
          "id": "task_2",
          "title": "顧客データの入力",
          "description": "エクセルファイルに顧客情報を50件入力してください",
          "deadline": "2024-02-12T12:00:00Z",
          "estimated_hours": 1.5,
          "required_skills": ["データ入力"],
          "priority": 2
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, 2);
    }

    #[test]
    fn open_means_deadline_strictly_after_now() {
        let task = TaskDraft::new("x", deadline(), 1.0, [SkillType::Design], 1)
            .into_task(TaskId::new("t"))
            .unwrap();
        assert!(task.is_open_at(deadline() - chrono::Duration::seconds(1)));
        assert!(!task.is_open_at(deadline()));
    }
}
