//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder / App**: アプリケーションの構築とワイヤリング、公開 API
//! - **AssignmentCoordinator**: 受諾と状態遷移（task → worker の順でロック）
//! - **CommitmentLedger**: ワーカーごとの拘束時間の台帳
//! - **BadgeIssuer**: 完了時のバッジ発行（タスクごとに高々 1 枚）
//! - **status**: 進捗とバッジの集計ビュー

pub mod badge_issuer;
pub mod builder;
pub mod coordinator;
pub mod ledger;
pub mod locks;
pub mod status;

// 主要な型を再エクスポート
pub use self::badge_issuer::BadgeIssuer;
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::coordinator::{AssignmentCoordinator, TransitionOutcome};
pub use self::ledger::{Commitment, CommitmentLedger};
pub use self::status::{BadgeSummary, ProgressSummary, StatusCounts};
