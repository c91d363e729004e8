//! Model-backed capabilities consumed by the analysis pipeline
//!
//! Summarization, sentiment classification and entity recognition are
//! provided by external models behind small async traits. The pipeline only
//! sees these traits; which models back them (and whether entity recognition
//! is configured at all) is decided by the [`registry`].

mod inference;
pub mod registry;

pub use inference::InferenceClient;
pub use registry::{CapabilityRegistry, CapabilitySet};

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a model-backed call.
///
/// Callers treat every variant the same way: the capability could not
/// produce a result, switch to the degraded path.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    #[error("Capability returned malformed output: {0}")]
    MalformedOutput(String),
}

/// Sentiment label with the model's confidence score.
#[derive(Debug, Clone)]
pub struct SentimentPrediction {
    pub label: String,
    pub score: f64,
}

/// A recognized entity span.
///
/// Tags follow CoNLL-style conventions (`B-PER`/`I-PER` for persons,
/// `B-DATE`/`I-DATE` for dates); aggregated variants like `PER` also occur.
#[derive(Debug, Clone)]
pub struct EntitySpan {
    pub text: String,
    pub tag: String,
}

impl EntitySpan {
    /// Whether this span names a person.
    pub fn is_person(&self) -> bool {
        self.tag.ends_with("PER")
    }
}

/// Abstractive summarization capability.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` into roughly `min_length..=max_length` words.
    ///
    /// Models treat the bounds as targets, not hard limits; slight over- or
    /// undershoot is acceptable.
    async fn summarize(
        &self,
        text: &str,
        min_length: usize,
        max_length: usize,
    ) -> std::result::Result<String, CapabilityError>;
}

/// Sentiment classification capability.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> std::result::Result<SentimentPrediction, CapabilityError>;
}

/// Named-entity recognition capability.
///
/// Optional: a deployment without NER is a valid configuration, in which
/// case the registry simply exposes no recognizer.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    async fn recognize(&self, text: &str) -> std::result::Result<Vec<EntitySpan>, CapabilityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_spans_match_both_tag_styles() {
        for tag in ["B-PER", "I-PER", "PER"] {
            let span = EntitySpan {
                text: "John".to_string(),
                tag: tag.to_string(),
            };
            assert!(span.is_person(), "{tag} should be a person tag");
        }

        let date = EntitySpan {
            text: "Friday".to_string(),
            tag: "B-DATE".to_string(),
        };
        assert!(!date.is_person());
    }
}
