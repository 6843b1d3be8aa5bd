pub mod api;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod extraction;
pub mod interview;
pub mod models;
pub mod scoring;
pub mod storage;
pub mod transcription;
