//! ProfileStore port - ワーカープロフィールの KV ストア
//!
//! # 設計原則
//! - worker_id ごとに 1 件
//! - 更新は丸ごと置き換え（部分マージしない）

use async_trait::async_trait;

use crate::domain::{MatchError, UserProfile, WorkerId};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// 見つからなければ `MatchError::NotFound`
    async fn get(&self, worker_id: &WorkerId) -> Result<UserProfile, MatchError>;

    async fn put(&self, worker_id: WorkerId, profile: UserProfile) -> Result<(), MatchError>;
}
