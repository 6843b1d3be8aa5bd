use std::sync::{Arc, Mutex, OnceLock};

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use crate::config::EmbeddingsConfig;
use crate::error::{CandorError, Result};

/// Shared handle to the sentence-embedding model.
///
/// The handle is constructed uninitialized and loaded exactly once, on
/// a blocking worker, before the server starts accepting scoring
/// requests. Any embed call racing the load fails fast with
/// [`CandorError::ModelNotReady`]; nothing here ever re-triggers a
/// load. Clones share the same underlying model slot.
#[derive(Clone)]
pub struct EmbeddingProvider {
    model: Arc<OnceLock<Arc<Mutex<TextEmbedding>>>>,
    model_name: String,
    batch_size: usize,
    dimensions: usize,
}

impl EmbeddingProvider {
    /// Create the handle without loading the model.
    pub fn deferred(config: &EmbeddingsConfig) -> Self {
        Self {
            model: Arc::new(OnceLock::new()),
            model_name: config.model.clone(),
            batch_size: config.batch_size,
            dimensions: config.dimensions,
        }
    }

    /// Load the model on the blocking pool. Idempotent: a second call
    /// (or a lost set race between clones) is a no-op.
    pub async fn load(&self) -> Result<()> {
        if self.is_ready() {
            return Ok(());
        }

        let embedding_model = resolve_embedding_model(&self.model_name);
        let built = tokio::task::spawn_blocking(move || build_model(embedding_model))
            .await
            .map_err(|e| CandorError::Embedding(format!("Embedding load worker failed: {e}")))??;

        let _ = self.model.set(Arc::new(Mutex::new(built)));
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.model.get().is_some()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Embed a batch of texts on the blocking pool.
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(self.model.get().ok_or_else(|| {
            CandorError::ModelNotReady(format!(
                "Embedding model '{}' is still loading; retry shortly",
                self.model_name
            ))
        })?);

        let batch_size = self.batch_size;
        tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|e| CandorError::Embedding(format!("Embedding model lock poisoned: {e}")))?;
            model
                .embed(texts, Some(batch_size))
                .map_err(|e| classify_embed_error(&e.to_string()))
        })
        .await
        .map_err(|e| CandorError::Embedding(format!("Embedding worker failed: {e}")))?
    }

    /// Embed reference and answer as a single batch on the shared
    /// model, so both vectors come from the same execution context.
    pub async fn embed_pair(&self, first: &str, second: &str) -> Result<(Vec<f32>, Vec<f32>)> {
        let mut embeddings = self
            .embed(vec![first.to_string(), second.to_string()])
            .await?;
        if embeddings.len() != 2 {
            return Err(CandorError::Embedding(format!(
                "Expected 2 embeddings, got {}",
                embeddings.len()
            )));
        }
        let second_vec = embeddings.pop().expect("length checked");
        let first_vec = embeddings.pop().expect("length checked");
        Ok((first_vec, second_vec))
    }
}

/// Distinguish resource exhaustion from other backend failures so
/// callers can apply backoff instead of treating it as fatal.
fn classify_embed_error(message: &str) -> CandorError {
    let lower = message.to_lowercase();
    if lower.contains("memory")
        || lower.contains("alloc")
        || lower.contains("resource")
        || lower.contains("exhaust")
    {
        CandorError::ResourceExhausted(message.to_string())
    } else {
        CandorError::Embedding(message.to_string())
    }
}

fn resolve_embedding_model(model_name: &str) -> EmbeddingModel {
    match model_name {
        "BAAI/bge-small-en-v1.5" | "bge-small-en-v1.5" => EmbeddingModel::BGESmallENV15,
        "BAAI/bge-base-en-v1.5" | "bge-base-en-v1.5" => EmbeddingModel::BGEBaseENV15,
        "all-MiniLM-L12-v2" | "sentence-transformers/all-MiniLM-L12-v2" => {
            EmbeddingModel::AllMiniLML12V2
        }
        _ => EmbeddingModel::AllMiniLML6V2,
    }
}

fn build_model(embedding_model: EmbeddingModel) -> Result<TextEmbedding> {
    TextEmbedding::try_new(InitOptions::new(embedding_model).with_show_download_progress(true))
        .map_err(|e| CandorError::Embedding(e.to_string()))
}
