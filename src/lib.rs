pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod supabase;

pub use db::create_pool;
pub use error::AppError;
pub use state::AppState;
