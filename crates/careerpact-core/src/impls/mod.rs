//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の in-memory 実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryProfileStore**
//! - **InMemoryTaskPool**
//! - **InMemoryBadgeStore**

pub mod inmem_badge;
pub mod inmem_profile;
pub mod inmem_task_pool;

pub use self::inmem_badge::InMemoryBadgeStore;
pub use self::inmem_profile::InMemoryProfileStore;
pub use self::inmem_task_pool::InMemoryTaskPool;
