mod api;
mod provider;

pub use provider::TranscriptionProvider;
