pub mod answers;
pub(crate) mod health;
pub mod plans;
pub mod resumes;
pub mod scores;
pub mod sessions;

pub use health::health_check;
