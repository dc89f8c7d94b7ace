//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - trait object（Arc<dyn Port>）による実装の差し替え

use std::sync::Arc;
use tracing::info;

use super::badge_issuer::BadgeIssuer;
use super::coordinator::{AssignmentCoordinator, TransitionOutcome};
use super::status::{BadgeSummary, ProgressSummary};
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{
    DigitalBadge, MatchError, Task, TaskDraft, TaskId, TaskStatus, UserProfile, WorkerId,
};
use crate::impls::{InMemoryBadgeStore, InMemoryProfileStore, InMemoryTaskPool};
use crate::matching::{MatchingEngine, MatchingService};
use crate::ports::{
    BadgeStore, Clock, IdGenerator, ProfileStore, SystemClock, TaskPool, UlidGenerator,
};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .config(EngineConfig::load("careerpact.toml")?)
///     .clock(FixedClock::new(now))
///     .build()?;
/// ```
///
/// # デフォルト
/// - ストアはすべて in-memory
/// - Clock は SystemClock
/// - IdGenerator は設定された Clock を使う UlidGenerator
pub struct AppBuilder {
    config: EngineConfig,
    profiles: Option<Arc<dyn ProfileStore>>,
    pool: Option<Arc<dyn TaskPool>>,
    badges: Option<Arc<dyn BadgeStore>>,
    clock: Option<Arc<dyn Clock>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            profiles: None,
            pool: None,
            badges: None,
            clock: None,
            id_generator: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.profiles = Some(store);
        self
    }

    pub fn task_pool(mut self, pool: Arc<dyn TaskPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn badge_store(mut self, store: Arc<dyn BadgeStore>) -> Self {
        self.badges = Some(store);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn id_generator(mut self, id_generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Some(Arc::new(id_generator));
        self
    }

    /// 設定を検証して App を生成
    ///
    /// # 検証
    /// - EngineConfig::validate() が通ること（max_offers ≥ 1、発行企業名が空でない）
    pub fn build(self) -> Result<App, BuildError> {
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let profiles = self
            .profiles
            .unwrap_or_else(|| Arc::new(InMemoryProfileStore::new()));
        let pool = self.pool.unwrap_or_else(|| Arc::new(InMemoryTaskPool::new()));
        let badges = self
            .badges
            .unwrap_or_else(|| Arc::new(InMemoryBadgeStore::new()));
        let id_generator = self
            .id_generator
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(clock.clone())));

        let issuer = Arc::new(BadgeIssuer::new(
            badges,
            clock.clone(),
            self.config.badges.issuer_company.clone(),
        ));
        let coordinator = Arc::new(AssignmentCoordinator::new(
            profiles.clone(),
            pool.clone(),
            issuer.clone(),
            clock.clone(),
        ));
        let matching = Arc::new(MatchingService::new(
            MatchingEngine::new().with_max_offers(self.config.matching.max_offers),
            profiles.clone(),
            pool.clone(),
            coordinator.clone(),
            clock.clone(),
        ));

        info!(
            issuer_company = %self.config.badges.issuer_company,
            max_offers = ?self.config.matching.max_offers,
            "app built"
        );

        Ok(App {
            config: Arc::new(self.config),
            profiles,
            pool,
            issuer,
            coordinator,
            matching,
            clock,
            id_generator,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App はマッチング・割り当て・バッジ発行の入口
///
/// HTTP 層などの外側はこの API を呼ぶだけでよい。
/// ワーカー ID は常に呼び出し側が明示的に渡す。
#[derive(Clone)]
pub struct App {
    config: Arc<EngineConfig>,
    profiles: Arc<dyn ProfileStore>,
    pool: Arc<dyn TaskPool>,
    issuer: Arc<BadgeIssuer>,
    coordinator: Arc<AssignmentCoordinator>,
    matching: Arc<MatchingService>,
    clock: Arc<dyn Clock>,
    id_generator: Arc<dyn IdGenerator>,
}

impl App {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// プロフィールを丸ごと保存（検証してから）
    pub async fn save_profile(
        &self,
        worker_id: &WorkerId,
        profile: UserProfile,
    ) -> Result<(), MatchError> {
        profile.validate()?;
        self.profiles.put(worker_id.clone(), profile).await?;
        info!(%worker_id, "profile saved");
        Ok(())
    }

    pub async fn profile(&self, worker_id: &WorkerId) -> Result<UserProfile, MatchError> {
        self.profiles.get(worker_id).await
    }

    /// 取り込み: ドラフトを検証して pending のタスクとしてプールに置く
    pub async fn ingest_task(&self, draft: TaskDraft) -> Result<Task, MatchError> {
        let id = draft
            .id
            .clone()
            .unwrap_or_else(|| self.id_generator.generate_task_id());
        let task = draft.into_task(id)?;
        self.pool.insert(task.clone()).await?;
        info!(task_id = %task.id, priority = task.priority, "task ingested");
        Ok(task)
    }

    pub async fn task(&self, task_id: &TaskId) -> Result<Task, MatchError> {
        self.pool.get(task_id).await
    }

    pub async fn tasks(&self) -> Result<Vec<Task>, MatchError> {
        self.pool.list_all().await
    }

    pub async fn offers(&self, worker_id: &WorkerId) -> Result<Vec<Task>, MatchError> {
        self.matching.offers_for(worker_id).await
    }

    pub async fn accept(&self, worker_id: &WorkerId, task_id: &TaskId) -> Result<Task, MatchError> {
        self.coordinator.accept(worker_id, task_id).await
    }

    pub async fn transition(
        &self,
        worker_id: &WorkerId,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> Result<TransitionOutcome, MatchError> {
        self.coordinator
            .transition(worker_id, task_id, new_status)
            .await
    }

    pub fn committed_hours(&self, worker_id: &WorkerId) -> f64 {
        self.coordinator.committed_hours(worker_id)
    }

    pub async fn badges(&self) -> Result<Vec<DigitalBadge>, MatchError> {
        self.issuer.list().await
    }

    pub async fn badge_for_task(&self, task_id: &TaskId) -> Result<DigitalBadge, MatchError> {
        self.issuer.badge_for_task(task_id).await
    }

    /// 外部で作ったバッジの登録（対象タスクが completed であること）
    ///
    /// completed への遷移はバッジを自動発行する。そのため通常の完了タスクに対しては
    /// `DuplicateBadge` になる。実際に登録できるのは、コーディネータを通さずに
    /// completed になったタスク（外部から取り込んだ完了済みの記録など）だけ。
    pub async fn register_badge(&self, badge: DigitalBadge) -> Result<(), MatchError> {
        let task = self.pool.get(&badge.task_id).await?;
        if task.status != TaskStatus::Completed {
            return Err(MatchError::TaskNotCompleted(task.id));
        }
        self.issuer.register(badge).await
    }

    /// ワーカーが受諾したタスクの進捗
    pub async fn progress(&self, worker_id: &WorkerId) -> Result<ProgressSummary, MatchError> {
        let mut tasks = Vec::new();
        for commitment in self.coordinator.commitments(worker_id) {
            tasks.push(self.pool.get(&commitment.task_id).await?);
        }
        Ok(ProgressSummary::from_tasks(&tasks))
    }

    pub async fn badge_summary(&self) -> Result<BadgeSummary, MatchError> {
        let badges = self.issuer.list().await?;
        Ok(BadgeSummary::from_badges(&badges, self.clock.now()))
    }
}
