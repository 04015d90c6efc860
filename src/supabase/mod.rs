//! Clients for the hosted Supabase services this API delegates to.

pub mod auth;
pub mod storage;

pub use auth::GoTrueClient;
pub use storage::StorageClient;
