mod plan;
mod profile;
mod score;

pub use plan::*;
pub use profile::*;
pub use score::*;
