//! Transcript analysis pipeline
//!
//! Summary, sentiment and action items for a meeting transcript, each
//! degrading gracefully when the backing model is unavailable.

pub mod actions;
mod models;
pub mod pipeline;
pub mod sentiment;
pub mod summarize;

pub use actions::ActionItemExtractor;
pub use models::{ActionItem, ActionStatus, MeetingInsights, Priority, SentimentType};
pub use pipeline::{Pipeline, TranscriptRequest};
pub use sentiment::SentimentAggregator;
pub use summarize::SummarizationOrchestrator;
