//! Status - 進捗と獲得バッジの集計ビュー

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{DigitalBadge, Task, TaskStatus};

/// Per-status counts for a worker's tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub support_needed: usize,
}

/// ProgressSummary はワーカーが抱えたタスクの進捗
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub counts: StatusCounts,
    pub total_tasks: usize,
    /// Rounded percentage of completed tasks (0 when there are none).
    pub completion_rate: u32,
    pub total_estimated_hours: f64,
    pub completed_hours: f64,
}

impl ProgressSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut summary = ProgressSummary {
            total_tasks: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            summary.total_estimated_hours += task.estimated_hours;
            match task.status {
                TaskStatus::Pending => summary.counts.pending += 1,
                TaskStatus::InProgress => summary.counts.in_progress += 1,
                TaskStatus::SupportNeeded => summary.counts.support_needed += 1,
                TaskStatus::Completed => {
                    summary.counts.completed += 1;
                    summary.completed_hours += task.estimated_hours;
                }
            }
        }
        if summary.total_tasks > 0 {
            let rate = summary.counts.completed as f64 * 100.0 / summary.total_tasks as f64;
            summary.completion_rate = rate.round() as u32;
        }
        summary
    }
}

/// BadgeSummary は獲得バッジの集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSummary {
    pub total: usize,
    pub issuer_companies: usize,
    /// Badges issued in the calendar month of `now`.
    pub issued_this_month: usize,
}

impl BadgeSummary {
    pub fn from_badges(badges: &[DigitalBadge], now: DateTime<Utc>) -> Self {
        let issuers: BTreeSet<&str> = badges
            .iter()
            .map(|badge| badge.issuer_company.as_str())
            .collect();
        let issued_this_month = badges
            .iter()
            .filter(|badge| {
                badge.issued_date.year() == now.year() && badge.issued_date.month() == now.month()
            })
            .count();
        Self {
            total: badges.len(),
            issuer_companies: issuers.len(),
            issued_this_month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BadgeId, SkillType, TaskDraft, TaskId};
    use chrono::TimeZone;

    fn task(id: &str, hours: f64, status: TaskStatus) -> Task {
        let deadline = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut task = TaskDraft::new(id, deadline, hours, [SkillType::Writing], 1)
            .into_task(TaskId::new(id))
            .unwrap();
        task.status = status;
        task
    }

    fn badge(task: &str, issuer: &str, issued: DateTime<Utc>) -> DigitalBadge {
        let task_id = TaskId::new(task);
        DigitalBadge {
            id: BadgeId::for_task(&task_id),
            title: task.into(),
            description: String::new(),
            issued_date: issued,
            issuer_company: issuer.into(),
            task_id,
        }
    }

    #[test]
    fn empty_progress_is_zero() {
        let summary = ProgressSummary::from_tasks(&[]);
        assert_eq!(summary, ProgressSummary::default());
        assert_eq!(summary.completion_rate, 0);
    }

    #[test]
    fn progress_counts_and_hours() {
        let tasks = vec![
            task("a", 2.0, TaskStatus::Completed),
            task("b", 1.5, TaskStatus::InProgress),
            task("c", 1.0, TaskStatus::SupportNeeded),
        ];
        let summary = ProgressSummary::from_tasks(&tasks);

        assert_eq!(summary.total_tasks, 3);
        assert_eq!(summary.counts.completed, 1);
        assert_eq!(summary.counts.in_progress, 1);
        assert_eq!(summary.counts.support_needed, 1);
        assert_eq!(summary.completion_rate, 33);
        assert_eq!(summary.total_estimated_hours, 4.5);
        assert_eq!(summary.completed_hours, 2.0);
    }

    #[test]
    fn badge_summary_counts_issuers_and_month() {
        let now = Utc.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap();
        let badges = vec![
            badge("a", "株式会社サンプル", Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
            badge("b", "株式会社サンプル", Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()),
            badge("c", "CareerPact", Utc.with_ymd_and_hms(2023, 2, 10, 0, 0, 0).unwrap()),
        ];

        let summary = BadgeSummary::from_badges(&badges, now);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.issuer_companies, 2);
        assert_eq!(summary.issued_this_month, 1);
    }
}
