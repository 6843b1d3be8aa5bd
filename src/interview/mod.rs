mod plan;
mod reference;

pub use plan::{build_plan, MAX_TECHNICAL_QUESTIONS};
pub use reference::build_reference;
