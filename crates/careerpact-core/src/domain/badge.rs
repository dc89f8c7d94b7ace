//! Digital badge: an immutable completion credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BadgeId, TaskId};

/// A credential referencing exactly one completed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalBadge {
    pub id: BadgeId,
    pub title: String,
    pub description: String,
    pub issued_date: DateTime<Utc>,
    pub issuer_company: String,
    pub task_id: TaskId,
}

impl DigitalBadge {
    /// Plain-text certificate for download.
    pub fn certificate_text(&self) -> String {
        format!(
            "デジタルバッジ証明書\n\n\
             バッジ名: {}\n\
             説明: {}\n\
             発行企業: {}\n\
             発行日: {}\n\n\
             このバッジは、タスク完了の証明として発行されます。\n",
            self.title,
            self.description,
            self.issuer_company,
            self.issued_date.format("%Y/%m/%d"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn certificate_lists_badge_fields() {
        let badge = DigitalBadge {
            id: BadgeId::new("badge-task_1"),
            title: "文章作成マスター".into(),
            description: "商品説明文の作成タスクを完了しました。".into(),
            issued_date: Utc.with_ymd_and_hms(2024, 2, 15, 9, 0, 0).unwrap(),
            issuer_company: "株式会社サンプル".into(),
            task_id: TaskId::new("task_1"),
        };

        let text = badge.certificate_text();
        assert!(text.contains("バッジ名: 文章作成マスター"));
        assert!(text.contains("発行企業: 株式会社サンプル"));
        assert!(text.contains("発行日: 2024/02/15"));
    }
}
