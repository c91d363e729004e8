//! Analysis pipeline orchestration
//!
//! One façade call per transcript: summary, sentiment and action items are
//! produced by independent stages and assembled into a single result. The
//! façade adds no business logic of its own.

use chrono::Utc;

use crate::analysis::actions::ActionItemExtractor;
use crate::analysis::sentiment::SentimentAggregator;
use crate::analysis::summarize::SummarizationOrchestrator;
use crate::analysis::{MeetingInsights, SentimentType};
use crate::capability::CapabilityRegistry;

/// Title used when the caller does not supply one.
const DEFAULT_TITLE: &str = "Untitled Meeting";

/// Transcript and caller-supplied metadata for one analysis run.
pub struct TranscriptRequest {
    pub transcript: String,
    pub title: Option<String>,
    pub participants: Vec<String>,
}

/// The analysis pipeline façade.
pub struct Pipeline<'a> {
    registry: &'a CapabilityRegistry,
    max_summary_length: usize,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a CapabilityRegistry, max_summary_length: usize) -> Self {
        Self {
            registry,
            max_summary_length,
        }
    }

    /// Analyze one transcript.
    ///
    /// Always returns a result: every stage degrades internally (extractive
    /// summary, neutral sentiment, empty action-item list) instead of
    /// propagating capability failures. Persisting the result is the
    /// caller's concern.
    pub async fn process(&self, request: TranscriptRequest) -> MeetingInsights {
        let capabilities = match self.registry.get().await {
            Ok(capabilities) => Some(capabilities),
            Err(e) => {
                tracing::warn!("Capability initialization failed ({e}), degrading all stages");
                None
            }
        };

        let (summary, sentiment, action_items) = match capabilities {
            Some(capabilities) => {
                let summarizer =
                    SummarizationOrchestrator::new(capabilities.summarizer.clone());
                let sentiment = SentimentAggregator::new(capabilities.sentiment.clone());
                let extractor = ActionItemExtractor::new(capabilities.entities.clone());

                // The three stages are independent; run them concurrently.
                tokio::join!(
                    summarizer.summarize(&request.transcript, self.max_summary_length),
                    sentiment.analyze(&request.transcript),
                    extractor.extract(&request.transcript),
                )
            }
            None => {
                let normalized = crate::text::normalize(&request.transcript);
                let summary = crate::analysis::summarize::extractive_summary(
                    &normalized,
                    self.max_summary_length,
                );
                let extractor = ActionItemExtractor::new(None);
                let action_items = extractor.extract(&request.transcript).await;
                (summary, SentimentType::Neutral, action_items)
            }
        };

        MeetingInsights {
            title: request
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            participants: request.participants,
            summary,
            sentiment,
            action_items,
            analyzed_at: Utc::now(),
        }
    }
}
