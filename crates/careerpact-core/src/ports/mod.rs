//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部の KV ストアや時刻源へのインターフェースを提供し、
//! 実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - TaskPool が状態の正本
//! - 状態遷移は compare-and-set で行う
//! - 開発用の実装は `impls` にある

pub mod badge_store;
pub mod clock;
pub mod id_generator;
pub mod profile_store;
pub mod task_pool;

pub use self::badge_store::BadgeStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::profile_store::ProfileStore;
pub use self::task_pool::TaskPool;
