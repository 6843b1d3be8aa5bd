pub mod answers;
pub mod plans;
pub mod resumes;
pub mod sessions;
