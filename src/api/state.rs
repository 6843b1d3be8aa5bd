use std::sync::Arc;

use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::scoring::ScoringService;
use crate::storage::SessionStore;
use crate::transcription::TranscriptionProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: SessionStore,
    pub embeddings: EmbeddingProvider,
    pub transcription: TranscriptionProvider,
    pub scoring: ScoringService,
}

impl AppState {
    pub fn new(
        config: Config,
        store: SessionStore,
        embeddings: EmbeddingProvider,
        transcription: TranscriptionProvider,
    ) -> Self {
        let config = Arc::new(config);
        let scoring = ScoringService::new(store.clone(), embeddings.clone(), &config.scoring);

        Self {
            config,
            store,
            embeddings,
            transcription,
            scoring,
        }
    }
}
