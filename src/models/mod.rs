pub mod applications;
pub mod client_profiles;
pub mod disputes;
pub mod files;
pub mod freelancer_profiles;
pub mod milestones;
pub mod preferences;
pub mod project_categories;
pub mod profiles;
pub mod projects;
pub mod reviews;
pub mod saved_projects;
pub mod skills;
pub mod subscriptions;
pub mod time_tracking;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
