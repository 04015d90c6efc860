//! Multi-step workflows: authorization, lifecycle checks and transactions
//! on top of the `db` repositories.

pub mod applications;
pub mod auth;
pub mod disputes;
pub mod files;
pub mod matching;
pub mod milestones;
pub mod projects;
pub mod reviews;
pub mod subscriptions;
pub mod time_tracking;
