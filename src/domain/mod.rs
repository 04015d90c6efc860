//! Pure business rules with no I/O.

pub mod billing;
pub mod lifecycle;
pub mod matching;
pub mod milestones;
pub mod reviews;
pub mod time;
