//! Milestone progress, rating summaries, time display and project matching.
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use freelancebot_backend::domain::{matching, milestones, reviews, time};
use freelancebot_backend::models::milestones::{Model as Milestone, MilestoneStatus};
use freelancebot_backend::models::projects::{Model as Project, ProjectStatus};

fn milestone(status: MilestoneStatus, amount: Option<f64>) -> Milestone {
    Milestone {
        id: Uuid::new_v4(),
        project_id: Uuid::nil(),
        title: "Milestone".to_string(),
        description: None,
        amount,
        due_date: None,
        status,
        completed_at: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn project(title: &str, skills: Option<Vec<&str>>) -> Project {
    Project {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        title: title.to_string(),
        description: "Build something".to_string(),
        budget_min: None,
        budget_max: None,
        deadline: None,
        required_skills: skills.map(|s| s.into_iter().map(String::from).collect()),
        category_id: None,
        status: ProjectStatus::Open,
        selected_freelancer_id: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[test]
fn test_milestone_progress() {
    use MilestoneStatus::*;

    assert_eq!(milestones::progress_percent(&[]), 0.0);
    assert_eq!(
        milestones::progress_percent(&[Completed, Pending, InProgress, Completed]),
        50.0
    );
    assert_eq!(milestones::progress_percent(&[Completed]), 100.0);
}

#[test]
fn test_milestone_summary_amounts() {
    let items = vec![
        milestone(MilestoneStatus::Completed, Some(500.0)),
        milestone(MilestoneStatus::InProgress, Some(300.0)),
        milestone(MilestoneStatus::Pending, None),
    ];

    let summary = milestones::summarize(&items);

    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.total_amount, 800.0);
    assert_eq!(summary.completed_amount, 500.0);
    assert!((summary.progress_percent - 33.333).abs() < 0.01);
}

#[test]
fn test_rating_summary() {
    let summary = reviews::summarize(&[5, 4, 5, 3]);

    assert_eq!(summary.count, 4);
    assert_eq!(summary.average, 4.25);

    let stars: Vec<u8> = summary.distribution.iter().map(|b| b.stars).collect();
    assert_eq!(stars, vec![5, 4, 3, 2, 1]);
    assert_eq!(summary.distribution[0].count, 2);
    assert_eq!(summary.distribution[0].percent, 50);
    assert_eq!(summary.distribution[1].percent, 25);
    assert_eq!(summary.distribution[4].count, 0);
}

#[test]
fn test_empty_rating_summary() {
    let summary = reviews::summarize(&[]);

    assert_eq!(summary.average, 0.0);
    assert!(summary.distribution.iter().all(|b| b.count == 0 && b.percent == 0));
}

#[test]
fn test_time_formatting() {
    assert_eq!(time::format_hms(3661), "01:01:01");
    assert_eq!(time::format_hms(0), "00:00:00");
    assert_eq!(time::format_hms(90_000), "25:00:00");
    assert_eq!(time::format_duration(125), "2h 5m");
    assert_eq!(time::format_duration(45), "45m");
}

#[test]
fn test_earnings_display() {
    assert_eq!(time::format_money(time::earnings(90, 40.0)), "$60.00");
    assert_eq!(time::format_money(time::earnings(0, 40.0)), "$0.00");
}

#[test]
fn test_durations_truncate_to_whole_minutes() {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let end = start + Duration::seconds(5 * 60 + 59);

    assert_eq!(time::duration_minutes(start, end), 5);
    assert_eq!(time::elapsed_seconds(start, end), 359);
    // A clock that went backwards never yields negative time.
    assert_eq!(time::duration_minutes(end, start), 0);
}

#[test]
fn test_match_score() {
    let skills = vec!["Rust".to_string(), "PostgreSQL".to_string()];
    let required = vec!["Go".to_string(), "Rust".to_string()];
    let unrelated = vec!["Figma".to_string()];

    assert_eq!(matching::score(Some(required.as_slice()), &skills), matching::SKILL_MATCH_SCORE);
    assert_eq!(matching::score(Some(unrelated.as_slice()), &skills), matching::NO_MATCH_SCORE);
    assert_eq!(matching::score(None, &skills), matching::NO_MATCH_SCORE);
    // Matching is exact; case differences do not count.
    assert_eq!(
        matching::score(Some(&["rust".to_string()][..]), &skills),
        matching::NO_MATCH_SCORE
    );
}

#[test]
fn test_rank_puts_matches_first_and_keeps_order_otherwise() {
    let projects = vec![
        project("design", Some(vec!["Figma"])),
        project("api", Some(vec!["Rust"])),
        project("misc", None),
        project("db", Some(vec!["PostgreSQL"])),
    ];
    let skills = vec!["Rust".to_string(), "PostgreSQL".to_string()];

    let ranked = matching::rank(projects, &skills);
    let titles: Vec<&str> = ranked.iter().map(|p| p.project.title.as_str()).collect();

    assert_eq!(titles, vec!["api", "db", "design", "misc"]);
    assert_eq!(ranked[0].match_score, Some(0.8));
    assert_eq!(ranked[3].match_score, Some(0.3));
}

#[test]
fn test_unscored_projects_have_no_score() {
    let ranked = matching::unscored(vec![project("a", None), project("b", Some(vec!["Rust"]))]);
    assert!(ranked.iter().all(|p| p.match_score.is_none()));
    assert_eq!(ranked[0].project.title, "a");
}
