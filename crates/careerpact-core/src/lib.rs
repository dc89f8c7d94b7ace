//! careerpact-core
//!
//! Task matching, assignment and badge issuance for the CareerPact engine.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, skill, profile, task, status, badge, errors）
//! - **ports**: 抽象化レイヤー（ProfileStore, TaskPool, BadgeStore, Clock, IdGenerator）
//! - **impls**: 実装（in-memory ストア、開発・テスト用）
//! - **matching**: 提示タスクの選定と順位付け（MatchingEngine は純粋関数）
//! - **app**: アプリケーションロジック（builder, coordinator, ledger, badge_issuer, status）
//! - **config**: TOML 設定
//! - **observability**: tracing-subscriber の初期化

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod matching;
pub mod observability;
pub mod ports;

pub use app::{App, AppBuilder};
pub use config::EngineConfig;
