//! Domain model (IDs, profiles, tasks, status machine, badges, errors).

pub mod badge;
pub mod errors;
pub mod ids;
pub mod profile;
pub mod skill;
pub mod status;
pub mod task;

pub use badge::DigitalBadge;
pub use errors::{ErrorKind, MatchError};
pub use ids::{BadgeId, TaskId, WorkerId};
pub use profile::UserProfile;
pub use skill::{ContactMethod, SkillType};
pub use status::TaskStatus;
pub use task::{Task, TaskDraft};
