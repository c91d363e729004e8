//! One-time capability initialization
//!
//! Capability handles are built lazily on first use and cached for the life
//! of the process. If the primary models cannot be built, a single fallback
//! attempt with smaller models is made; the fallback set drops entity
//! recognition, which downstream stages treat as a valid configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::OnceCell;

use crate::capability::{
    CapabilityError, EntityRecognizer, InferenceClient, SentimentClassifier, Summarizer,
};
use crate::config::{ModelSettings, Settings};

/// The loaded capability handles shared by all analyses.
#[derive(Clone)]
pub struct CapabilitySet {
    pub summarizer: Arc<dyn Summarizer>,
    pub sentiment: Arc<dyn SentimentClassifier>,
    pub entities: Option<Arc<dyn EntityRecognizer>>,
}

/// Lazily-initialized, process-wide capability provider.
///
/// Construct one registry at startup and pass it by reference into the
/// pipeline. The inner cell guarantees initialization runs at most once even
/// under concurrent first calls; a failed initialization is retried on the
/// next call rather than cached.
pub struct CapabilityRegistry {
    models: ModelSettings,
    cell: OnceCell<Arc<CapabilitySet>>,
}

impl CapabilityRegistry {
    /// Create a registry that builds providers from settings on first use.
    pub fn new(settings: &Settings) -> Self {
        Self {
            models: settings.models.clone(),
            cell: OnceCell::new(),
        }
    }

    /// Create a registry around pre-built capability handles.
    ///
    /// Used by tests and embedders that supply their own providers.
    pub fn with_capabilities(set: CapabilitySet) -> Self {
        Self {
            models: ModelSettings::default(),
            cell: OnceCell::new_with(Some(Arc::new(set))),
        }
    }

    /// Get the capability set, initializing it on first call.
    pub async fn get(&self) -> std::result::Result<Arc<CapabilitySet>, CapabilityError> {
        self.cell
            .get_or_try_init(|| async {
                match build_primary(&self.models) {
                    Ok(set) => {
                        tracing::info!("Capability providers initialized");
                        Ok(Arc::new(set))
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Primary model initialization failed ({e:#}), trying fallback models"
                        );
                        build_fallback(&self.models)
                            .map(|set| {
                                tracing::info!("Fallback capability providers initialized");
                                Arc::new(set)
                            })
                            .map_err(|e| CapabilityError::Unavailable(format!("{e:#}")))
                    }
                }
            })
            .await
            .map(Arc::clone)
    }
}

fn build_primary(models: &ModelSettings) -> Result<CapabilitySet> {
    let summarizer = client(models, &models.summarization_model)
        .context("Failed to build summarization client")?;
    let sentiment =
        client(models, &models.sentiment_model).context("Failed to build sentiment client")?;

    let entities = if models.enable_ner {
        let recognizer =
            client(models, &models.ner_model).context("Failed to build NER client")?;
        Some(Arc::new(recognizer) as Arc<dyn EntityRecognizer>)
    } else {
        None
    };

    Ok(CapabilitySet {
        summarizer: Arc::new(summarizer),
        sentiment: Arc::new(sentiment),
        entities,
    })
}

// Smaller models, no entity recognition.
fn build_fallback(models: &ModelSettings) -> Result<CapabilitySet> {
    let summarizer = client(models, &models.fallback_summarization_model)
        .context("Failed to build fallback summarization client")?;
    let sentiment = client(models, &models.fallback_sentiment_model)
        .context("Failed to build fallback sentiment client")?;

    Ok(CapabilitySet {
        summarizer: Arc::new(summarizer),
        sentiment: Arc::new(sentiment),
        entities: None,
    })
}

fn client(models: &ModelSettings, model: &str) -> Result<InferenceClient> {
    InferenceClient::new(
        &models.endpoint,
        models.api_token.as_deref(),
        model,
        models.timeout_secs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn primary_models_initialize_once() {
        let settings = Settings::default();
        let registry = CapabilityRegistry::new(&settings);

        let first = registry.get().await.expect("primary init should succeed");
        let second = registry.get().await.expect("cached set should be returned");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.entities.is_some());
    }

    #[tokio::test]
    async fn empty_primary_model_falls_back_to_smaller_models() {
        let mut settings = Settings::default();
        settings.models.summarization_model = String::new();
        let registry = CapabilityRegistry::new(&settings);

        let set = registry.get().await.expect("fallback init should succeed");
        assert!(set.entities.is_none(), "fallback set drops NER");
    }

    #[tokio::test]
    async fn disabled_ner_is_a_valid_configuration() {
        let mut settings = Settings::default();
        settings.models.enable_ner = false;
        let registry = CapabilityRegistry::new(&settings);

        let set = registry.get().await.expect("init should succeed");
        assert!(set.entities.is_none());
    }
}
