use std::time::Duration;

use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TranscriptionConfig;
use crate::error::{CandorError, Result};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Clone)]
pub struct TranscriptionApiClient {
    client: Client,
    config: TranscriptionConfig,
}

impl TranscriptionApiClient {
    pub fn new(config: &TranscriptionConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(CandorError::Transcription(
                "API key required for transcription API".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CandorError::Transcription(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub async fn transcribe(
        &self,
        audio_bytes: &[u8],
        file_extension: Option<&str>,
    ) -> Result<String> {
        let mut last_error: Option<CandorError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                // 100ms, 200ms, 400ms
                let delay_ms = 100 * 2_u64.pow(attempt - 1);
                debug!("Retry attempt {} after {}ms", attempt, delay_ms);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            match self.transcribe_internal(audio_bytes, file_extension).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    let retryable = matches!(
                        &e,
                        CandorError::Transcription(msg)
                            if msg.contains("500") || msg.contains("timeout")
                    );

                    if !retryable {
                        // 401, 429 and similar fail immediately
                        return Err(e);
                    }

                    if attempt < MAX_RETRIES {
                        warn!(
                            "Transcription attempt {} failed (retryable): {}",
                            attempt + 1,
                            e
                        );
                        last_error = Some(e);
                        continue;
                    }

                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            CandorError::Transcription("Transcription failed after retries".to_string())
        }))
    }

    async fn transcribe_internal(
        &self,
        audio_bytes: &[u8],
        file_extension: Option<&str>,
    ) -> Result<String> {
        let file_name = format!("audio.{}", file_extension.unwrap_or("mp3"));
        let mime_type = infer_mime_type(file_extension);

        let file_part = multipart::Part::bytes(audio_bytes.to_vec())
            .file_name(file_name)
            .mime_str(mime_type)
            .map_err(|e| CandorError::Transcription(format!("Invalid MIME type: {e}")))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone())
            .text("response_format", "json");

        let base_url = self.config.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
        let url = format!("{base_url}/audio/transcriptions");

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| CandorError::Transcription("API key not configured".to_string()))?;

        debug!("Sending transcription request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CandorError::Transcription("Request timeout".to_string())
                } else {
                    CandorError::Transcription(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        debug!("Transcription response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(map_http_error(status, &error_body));
        }

        let body: TranscriptionResponse = response.json().await.map_err(|e| {
            CandorError::Transcription(format!("Failed to parse transcription response: {e}"))
        })?;

        if body.text.trim().is_empty() {
            return Err(CandorError::Transcription(
                "Transcription response contained empty text".to_string(),
            ));
        }

        Ok(body.text)
    }
}

fn infer_mime_type(file_extension: Option<&str>) -> &'static str {
    match file_extension {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("m4a") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "audio/mpeg",
    }
}

fn map_http_error(status: StatusCode, error_body: &str) -> CandorError {
    match status {
        StatusCode::UNAUTHORIZED => CandorError::Transcription(format!(
            "Authentication failed (401): Invalid API key. Error: {error_body}"
        )),
        StatusCode::TOO_MANY_REQUESTS => CandorError::Transcription(format!(
            "Rate limit exceeded (429): Too many requests. Error: {error_body}"
        )),
        StatusCode::INTERNAL_SERVER_ERROR => CandorError::Transcription(format!(
            "Server error (500): The transcription service encountered an error. Error: {error_body}"
        )),
        _ => CandorError::Transcription(format!("Transcription API error ({status}): {error_body}")),
    }
}
