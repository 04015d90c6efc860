use serde::Serialize;

use crate::models::projects;

pub const SKILL_MATCH_SCORE: f64 = 0.8;
pub const NO_MATCH_SCORE: f64 = 0.3;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredProject {
    #[serde(flatten)]
    pub project: projects::Model,
    pub match_score: Option<f64>,
}

/// 0.8 when any required skill appears verbatim in the freelancer's skills,
/// otherwise 0.3. A project without required skills never matches.
pub fn score(required_skills: Option<&[String]>, freelancer_skills: &[String]) -> f64 {
    let matched = required_skills
        .map(|req| req.iter().any(|skill| freelancer_skills.contains(skill)))
        .unwrap_or(false);

    if matched {
        SKILL_MATCH_SCORE
    } else {
        NO_MATCH_SCORE
    }
}

/// Scores and orders projects by descending score. The sort is stable, so
/// equal scores keep the incoming order.
pub fn rank(projects: Vec<projects::Model>, freelancer_skills: &[String]) -> Vec<ScoredProject> {
    let mut scored: Vec<ScoredProject> = projects
        .into_iter()
        .map(|project| {
            let s = score(project.required_skills.as_deref(), freelancer_skills);
            ScoredProject {
                project,
                match_score: Some(s),
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.match_score
            .unwrap_or(0.0)
            .total_cmp(&a.match_score.unwrap_or(0.0))
    });
    scored
}

/// The unscored form, used when the freelancer has no skill list.
pub fn unscored(projects: Vec<projects::Model>) -> Vec<ScoredProject> {
    projects
        .into_iter()
        .map(|project| ScoredProject {
            project,
            match_score: None,
        })
        .collect()
}
