//! Task status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// State transitions:
/// - Pending -> InProgress (accept only)
/// - InProgress -> Completed
/// - InProgress -> SupportNeeded -> InProgress (worker resumes after help)
///
/// Nothing moves back into Pending. Completed is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// In the pool, not yet accepted.
    Pending,

    /// Accepted by exactly one worker.
    InProgress,

    /// Done; a badge exists for it.
    Completed,

    /// Worker asked for help; hours stay committed.
    SupportNeeded,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::SupportNeeded,
    ];

    /// Is `self -> next` an edge of the state machine?
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        use TaskStatus::*;
        match (self, next) {
            (Pending, InProgress) => true,
            (InProgress, Completed) => true,
            (InProgress, SupportNeeded) => true,
            (SupportNeeded, InProgress) => true,
            (Pending, _) | (InProgress, _) | (Completed, _) | (SupportNeeded, _) => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Does a task in this status consume its holder's weekly capacity?
    pub fn holds_capacity(self) -> bool {
        matches!(self, TaskStatus::InProgress | TaskStatus::SupportNeeded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::SupportNeeded => "support_needed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use TaskStatus::*;

    #[rstest]
    #[case::accept(Pending, InProgress)]
    #[case::complete(InProgress, Completed)]
    #[case::ask_for_help(InProgress, SupportNeeded)]
    #[case::resume(SupportNeeded, InProgress)]
    fn valid_edges(#[case] from: TaskStatus, #[case] to: TaskStatus) {
        assert!(from.can_transition_to(to));
    }

    #[rstest]
    #[case::skip_accept(Pending, Completed)]
    #[case::pending_to_support(Pending, SupportNeeded)]
    #[case::back_to_pending(InProgress, Pending)]
    #[case::reopen(Completed, InProgress)]
    #[case::completed_to_pending(Completed, Pending)]
    #[case::complete_without_resume(SupportNeeded, Completed)]
    #[case::support_to_pending(SupportNeeded, Pending)]
    fn invalid_edges(#[case] from: TaskStatus, #[case] to: TaskStatus) {
        assert!(!from.can_transition_to(to));
    }

    #[test]
    fn no_self_loops() {
        for status in TaskStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn nothing_re_enters_pending() {
        for status in TaskStatus::ALL {
            assert!(!status.can_transition_to(Pending));
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&SupportNeeded).unwrap(), "\"support_needed\"");
        let parsed: TaskStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(parsed, InProgress);
    }
}
