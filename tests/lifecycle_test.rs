use freelancebot_backend::domain::lifecycle::{
    Transition, check_manual_project_transition, dispute_settles,
};
use freelancebot_backend::error::AppError;
use freelancebot_backend::models::applications::ApplicationStatus;
use freelancebot_backend::models::disputes::DisputeStatus;
use freelancebot_backend::models::milestones::MilestoneStatus;
use freelancebot_backend::models::projects::ProjectStatus;

#[test]
fn test_project_transitions() {
    use ProjectStatus::*;

    assert!(Open.check(InProgress).is_ok());
    assert!(Open.check(Cancelled).is_ok());
    assert!(InProgress.check(Completed).is_ok());
    assert!(InProgress.check(Cancelled).is_ok());

    assert!(Open.check(Completed).is_err());
    assert!(Completed.check(Open).is_err());
    assert!(Cancelled.check(InProgress).is_err());

    assert!(Completed.is_terminal());
    assert!(Cancelled.is_terminal());
    assert!(!Open.is_terminal());
}

#[test]
fn test_same_status_is_always_allowed() {
    assert!(ProjectStatus::Completed.check(ProjectStatus::Completed).is_ok());
    assert!(ApplicationStatus::Rejected.check(ApplicationStatus::Rejected).is_ok());
    assert!(DisputeStatus::Closed.check(DisputeStatus::Closed).is_ok());
}

#[test]
fn test_application_decisions_are_final() {
    use ApplicationStatus::*;

    assert!(Pending.check(Accepted).is_ok());
    assert!(Pending.check(Rejected).is_ok());
    assert!(Accepted.check(Rejected).is_err());
    assert!(Rejected.check(Pending).is_err());
}

#[test]
fn test_milestone_transitions() {
    use MilestoneStatus::*;

    assert!(Pending.check(InProgress).is_ok());
    assert!(InProgress.check(Completed).is_ok());
    assert!(InProgress.check(Disputed).is_ok());
    assert!(Pending.check(Completed).is_err());
    assert!(Completed.check(InProgress).is_err());
}

#[test]
fn test_dispute_transitions_and_settlement() {
    use DisputeStatus::*;

    assert!(Open.check(InReview).is_ok());
    assert!(InReview.check(Resolved).is_ok());
    assert!(Open.check(Resolved).is_err());
    assert!(Resolved.check(Open).is_err());

    assert!(dispute_settles(Resolved));
    assert!(dispute_settles(Closed));
    assert!(!dispute_settles(InReview));
}

#[test]
fn test_invalid_transition_error_names_the_entity() {
    let err = ProjectStatus::Completed
        .check(ProjectStatus::Open)
        .unwrap_err();

    match err {
        AppError::InvalidTransition(msg) => assert!(msg.starts_with("Project cannot move")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_projects_start_only_through_acceptance() {
    let err = check_manual_project_transition(ProjectStatus::Open, ProjectStatus::InProgress)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition(_)));

    assert!(check_manual_project_transition(ProjectStatus::Open, ProjectStatus::Cancelled).is_ok());
    assert!(
        check_manual_project_transition(ProjectStatus::InProgress, ProjectStatus::Completed)
            .is_ok()
    );
}
