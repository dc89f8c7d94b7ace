//! Matching - ワーカーに提示するタスクの選定と順位付け
//!
//! - **engine**: 純粋関数（profile + snapshot → ranked offers）
//! - **service**: ストアとコーディネータから入力を集めて engine を呼ぶ

pub mod engine;
pub mod service;

pub use self::engine::{MatchingEngine, offer_order};
pub use self::service::MatchingService;
