use std::time::Duration;

use tracing::{info, warn};

use crate::config::TranscriptionConfig;
use crate::error::{CandorError, Result};

use super::api::TranscriptionApiClient;

#[derive(Clone)]
enum TranscriptionBackend {
    Api { client: TranscriptionApiClient },
    Unavailable { reason: String },
}

/// Speech-to-text for spoken interview answers. Degrades gracefully:
/// without an API key the provider still constructs, and transcription
/// calls report the service as unavailable instead of failing startup.
#[derive(Clone)]
pub struct TranscriptionProvider {
    backend: TranscriptionBackend,
    config: TranscriptionConfig,
}

impl TranscriptionProvider {
    pub fn new(config: &TranscriptionConfig) -> Self {
        let backend = match TranscriptionApiClient::new(config) {
            Ok(client) => {
                info!(model = %config.model, "Transcription API backend initialized");
                TranscriptionBackend::Api { client }
            }
            Err(e) => {
                let reason = format!("Transcription backend unavailable: {e}");
                warn!("{}", reason);
                TranscriptionBackend::Unavailable { reason }
            }
        };

        Self {
            backend,
            config: config.clone(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, TranscriptionBackend::Unavailable { .. })
    }

    pub async fn transcribe(
        &self,
        audio_bytes: &[u8],
        file_extension: Option<&str>,
    ) -> Result<String> {
        if audio_bytes.len() as u64 > self.config.max_file_size {
            return Err(CandorError::Validation(format!(
                "Audio file exceeds the {} byte limit",
                self.config.max_file_size
            )));
        }

        let timeout = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(timeout, self.transcribe_internal(audio_bytes, file_extension))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(CandorError::Transcription(format!(
                "Transcription timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }

    async fn transcribe_internal(
        &self,
        audio_bytes: &[u8],
        file_extension: Option<&str>,
    ) -> Result<String> {
        match &self.backend {
            TranscriptionBackend::Api { client } => {
                client.transcribe(audio_bytes, file_extension).await
            }
            TranscriptionBackend::Unavailable { reason } => {
                Err(CandorError::TranscriptionUnavailable(reason.clone()))
            }
        }
    }
}
