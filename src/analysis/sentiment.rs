//! Sentiment aggregation
//!
//! Short transcripts get a single classifier call; long transcripts are
//! chunked and the per-chunk confidence scores are summed into one overall
//! label. Sentiment is best-effort: every failure degrades to neutral.

use std::sync::Arc;

use anyhow::Result;

use crate::analysis::SentimentType;
use crate::capability::SentimentClassifier;
use crate::text;

/// Words per chunk when classifying long transcripts.
const CHUNK_WORDS: usize = 500;

/// Produces an overall sentiment label for one transcript.
pub struct SentimentAggregator {
    classifier: Arc<dyn SentimentClassifier>,
}

impl SentimentAggregator {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify the overall sentiment of `transcript`.
    ///
    /// Never fails: any classifier failure degrades the result to
    /// [`SentimentType::Neutral`].
    pub async fn analyze(&self, transcript: &str) -> SentimentType {
        let normalized = text::normalize(transcript);

        match self.aggregate(&normalized).await {
            Ok(sentiment) => sentiment,
            Err(e) => {
                tracing::warn!("Sentiment analysis failed ({e:#}), degrading to neutral");
                SentimentType::Neutral
            }
        }
    }

    async fn aggregate(&self, normalized: &str) -> Result<SentimentType> {
        if text::word_count(normalized) <= CHUNK_WORDS {
            let prediction = self.classifier.classify(normalized).await?;
            return Ok(label_sentiment(&prediction.label));
        }

        let chunks = text::split_words(normalized, CHUNK_WORDS)?;

        let mut positive_score = 0.0;
        let mut negative_score = 0.0;
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!("Classifying chunk {}/{}", i + 1, chunks.len());
            let prediction = self.classifier.classify(chunk).await?;

            let label = prediction.label.to_lowercase();
            if label.contains("positive") {
                positive_score += prediction.score;
            } else if label.contains("negative") {
                negative_score += prediction.score;
            }
        }

        // Strict comparison: a tie (including no scored chunks) is neutral.
        if positive_score > negative_score {
            Ok(SentimentType::Positive)
        } else if negative_score > positive_score {
            Ok(SentimentType::Negative)
        } else {
            Ok(SentimentType::Neutral)
        }
    }
}

fn label_sentiment(label: &str) -> SentimentType {
    let label = label.to_lowercase();
    if label.contains("positive") {
        SentimentType::Positive
    } else if label.contains("negative") {
        SentimentType::Negative
    } else {
        SentimentType::Neutral
    }
}
