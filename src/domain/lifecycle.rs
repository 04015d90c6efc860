//! Allowed status transitions for every stateful entity.
//!
//! Setting an entity to the status it already has is always allowed and
//! treated as a no-op by the callers.

use crate::error::AppError;
use crate::models::applications::ApplicationStatus;
use crate::models::disputes::DisputeStatus;
use crate::models::milestones::MilestoneStatus;
use crate::models::projects::ProjectStatus;

pub trait Transition: Copy + PartialEq + std::fmt::Debug {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn allows(self, next: Self) -> bool;

    fn is_terminal(self) -> bool;

    fn check(self, next: Self) -> Result<(), AppError> {
        if self == next || self.allows(next) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition(format!(
                "{} cannot move from {:?} to {:?}",
                Self::ENTITY,
                self,
                next
            )))
        }
    }
}

impl Transition for ProjectStatus {
    const ENTITY: &'static str = "Project";

    fn allows(self, next: Self) -> bool {
        use ProjectStatus::*;
        matches!(
            (self, next),
            (Open, InProgress) | (Open, Cancelled) | (InProgress, Completed) | (InProgress, Cancelled)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

impl Transition for ApplicationStatus {
    const ENTITY: &'static str = "Application";

    fn allows(self, next: Self) -> bool {
        use ApplicationStatus::*;
        matches!((self, next), (Pending, Accepted) | (Pending, Rejected))
    }

    fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

impl Transition for MilestoneStatus {
    const ENTITY: &'static str = "Milestone";

    fn allows(self, next: Self) -> bool {
        use MilestoneStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (InProgress, Completed) | (Pending, Disputed) | (InProgress, Disputed)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, MilestoneStatus::Completed | MilestoneStatus::Disputed)
    }
}

impl Transition for DisputeStatus {
    const ENTITY: &'static str = "Dispute";

    fn allows(self, next: Self) -> bool {
        use DisputeStatus::*;
        matches!(
            (self, next),
            (Open, InReview) | (Open, Closed) | (InReview, Resolved) | (InReview, Closed)
        )
    }

    fn is_terminal(self) -> bool {
        matches!(self, DisputeStatus::Resolved | DisputeStatus::Closed)
    }
}

/// Whether the dispute leaves the active queue and must record who settled it.
pub fn dispute_settles(next: DisputeStatus) -> bool {
    next.is_terminal()
}

/// A project may be moved to `in_progress` only by accepting an application,
/// never through the plain status endpoint.
pub fn check_manual_project_transition(
    current: ProjectStatus,
    next: ProjectStatus,
) -> Result<(), AppError> {
    if next == ProjectStatus::InProgress && current != ProjectStatus::InProgress {
        return Err(AppError::InvalidTransition(
            "A project starts only when one of its applications is accepted".to_string(),
        ));
    }
    current.check(next)
}
