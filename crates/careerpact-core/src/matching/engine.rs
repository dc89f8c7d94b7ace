//! MatchingEngine - フィルタ + 順位付け
//!
//! # 設計原則
//! - 純粋関数（入力だけから出力が決まる。状態を変えない）
//! - 複数ワーカーが同じスナップショットに対して同時に呼んでよい
//! - 該当なしは空リスト（エラーではない）

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::domain::{MatchError, Task, UserProfile};

/// Offer ordering: a total order over tasks.
///
/// 1. priority ascending (lower = more urgent)
/// 2. deadline ascending
/// 3. estimated_hours ascending
/// 4. id ascending
pub fn offer_order(a: &Task, b: &Task) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| a.deadline.cmp(&b.deadline))
        .then_with(|| a.estimated_hours.total_cmp(&b.estimated_hours))
        .then_with(|| a.id.cmp(&b.id))
}

/// MatchingEngine はワーカー 1 人分の提示リストを作る
///
/// # フィルタ（すべて満たすこと）
/// - status == pending
/// - required_skills ∩ profile.skills ≠ ∅
/// - deadline > now
/// - estimated_hours ≤ weekly_hours − committed_hours
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    max_offers: Option<usize>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// 順位付け後に先頭 `max_offers` 件だけ返す
    pub fn with_max_offers(mut self, max_offers: Option<usize>) -> Self {
        self.max_offers = max_offers;
        self
    }

    pub fn max_offers(&self) -> Option<usize> {
        self.max_offers
    }

    /// Is `task` offerable to this worker right now?
    pub fn is_eligible(
        profile: &UserProfile,
        task: &Task,
        committed_hours: f64,
        now: DateTime<Utc>,
    ) -> bool {
        task.is_pending()
            && profile.covers_any(&task.required_skills)
            && task.is_open_at(now)
            && profile.fits(committed_hours, task.estimated_hours)
    }

    /// Filter and rank `snapshot` for `profile`.
    ///
    /// # Errors
    /// `InvalidProfile` when the profile has no skills or no capacity.
    pub fn rank<'a>(
        &self,
        profile: &UserProfile,
        snapshot: &'a [Task],
        committed_hours: f64,
        now: DateTime<Utc>,
    ) -> Result<Vec<&'a Task>, MatchError> {
        profile.validate()?;

        let mut offers: Vec<&Task> = snapshot
            .iter()
            .filter(|task| Self::is_eligible(profile, task, committed_hours, now))
            .collect();
        offers.sort_by(|a, b| offer_order(a, b));

        if let Some(limit) = self.max_offers {
            offers.truncate(limit);
        }
        Ok(offers)
    }
}
