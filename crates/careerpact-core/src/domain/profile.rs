//! Worker profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::errors::MatchError;
use super::skill::{ContactMethod, SkillType};

/// A worker's declared availability, capacity and skills.
///
/// Stored per worker id and replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Weekday tags, e.g. "月曜日".
    pub available_days: BTreeSet<String>,

    /// Time-range tags in the order the worker listed them.
    pub available_time_slots: Vec<String>,

    /// Weekly capacity in hours.
    pub weekly_hours: i32,

    pub skills: BTreeSet<SkillType>,

    pub preferred_contact: ContactMethod,
}

impl UserProfile {
    pub fn new(
        skills: impl IntoIterator<Item = SkillType>,
        weekly_hours: i32,
        preferred_contact: ContactMethod,
    ) -> Self {
        Self {
            available_days: BTreeSet::new(),
            available_time_slots: Vec::new(),
            weekly_hours,
            skills: skills.into_iter().collect(),
            preferred_contact,
        }
    }

    pub fn with_days<S: Into<String>>(mut self, days: impl IntoIterator<Item = S>) -> Self {
        self.available_days = days.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time_slots<S: Into<String>>(mut self, slots: impl IntoIterator<Item = S>) -> Self {
        self.available_time_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Matching and capacity accounting both require a usable profile.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.skills.is_empty() {
            return Err(MatchError::InvalidProfile("skills must not be empty".into()));
        }
        if self.weekly_hours <= 0 {
            return Err(MatchError::InvalidProfile(format!(
                "weekly_hours must be positive (got {})",
                self.weekly_hours
            )));
        }
        Ok(())
    }

    /// Does the worker have at least one of `required`?
    pub fn covers_any(&self, required: &BTreeSet<SkillType>) -> bool {
        // 両方とも小さい集合なので intersection で十分
        self.skills.intersection(required).next().is_some()
    }

    /// Does a task of `hours` fit on top of `committed`?
    ///
    /// 提示と受諾の両方がこの式を使う（引き算版だと丸めで結果が食い違う）
    pub fn fits(&self, committed: f64, hours: f64) -> bool {
        committed + hours <= f64::from(self.weekly_hours)
    }
}
