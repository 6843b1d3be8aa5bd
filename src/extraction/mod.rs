mod profile;
mod text;

pub use profile::{extract_profile, SKILL_VOCABULARY};
pub use text::{ContentExtractor, ResumeFormat};
