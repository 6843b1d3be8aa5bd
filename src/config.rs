use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub embeddings: EmbeddingsConfig,
    pub scoring: ScoringConfig,
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Root directory holding one subdirectory per interview session.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub root: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Plan-wide fallback threshold below which answers are flagged for
    /// human review. Questions may override it individually.
    pub default_min_score: f64,
    /// Number of lexical matches returned by the explainability layer.
    pub top_matches: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_file_size: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model: "whisper-1".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 300,
            max_file_size: 104857600,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_min_score: 5.0,
            top_matches: 6,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("CANDOR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CANDOR_PORT", 8000),
            },
            storage: StorageConfig {
                root: env::var("CANDOR_STORAGE_DIR").unwrap_or_else(|_| "storage".to_string()),
            },
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "all-MiniLM-L6-v2".to_string()),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", 384),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", 32),
            },
            scoring: ScoringConfig {
                default_min_score: parse_env_or("SCORING_DEFAULT_MIN_SCORE", 5.0),
                top_matches: parse_env_or("SCORING_TOP_MATCHES", 6),
            },
            transcription: TranscriptionConfig {
                model: env::var("TRANSCRIPTION_MODEL").unwrap_or_else(|_| "whisper-1".to_string()),
                api_key: env::var("TRANSCRIPTION_API_KEY").ok(),
                base_url: env::var("TRANSCRIPTION_BASE_URL").ok(),
                timeout_secs: parse_env_or("TRANSCRIPTION_TIMEOUT", 300),
                max_file_size: parse_env_or("TRANSCRIPTION_MAX_FILE_SIZE", 104857600),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_scoring_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("SCORING_DEFAULT_MIN_SCORE");
        std::env::remove_var("SCORING_TOP_MATCHES");

        let config = Config::default();
        assert_eq!(config.scoring.default_min_score, 5.0);
        assert_eq!(config.scoring.top_matches, 6);
    }

    #[test]
    fn test_scoring_config_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("SCORING_DEFAULT_MIN_SCORE", "6.5");

        let config = Config::default();
        assert_eq!(config.scoring.default_min_score, 6.5);

        std::env::remove_var("SCORING_DEFAULT_MIN_SCORE");
    }

    #[test]
    fn test_embeddings_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("EMBEDDING_MODEL");
        std::env::remove_var("EMBEDDING_DIMENSIONS");

        let config = Config::default();
        assert_eq!(config.embeddings.model, "all-MiniLM-L6-v2");
        assert_eq!(config.embeddings.dimensions, 384);
    }

    #[test]
    fn test_transcription_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("TRANSCRIPTION_MODEL");
        std::env::remove_var("TRANSCRIPTION_API_KEY");

        let config = Config::default();
        assert_eq!(config.transcription.model, "whisper-1");
        assert!(config.transcription.api_key.is_none());
        assert_eq!(config.transcription.timeout_secs, 300);
    }

    #[test]
    fn test_parse_env_or_invalid_value_falls_back() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("__TEST_CANDOR_PORT", "not-a-port");
        let result: u16 = parse_env_or("__TEST_CANDOR_PORT", 8000);
        assert_eq!(result, 8000);
        std::env::remove_var("__TEST_CANDOR_PORT");
    }
}
