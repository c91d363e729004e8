//! Data models for analysis results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall sentiment of a meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentType {
    Positive,
    Negative,
    Neutral,
}

impl SentimentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Priority of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Lifecycle state of an action item
///
/// Extraction always produces `Pending`; later transitions happen through
/// whatever stores the items, not through this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    InProgress,
    Completed,
}

/// An action item extracted from a transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// The task to be completed
    pub task: String,

    /// Person responsible, when one was identified
    pub assignee: Option<String>,

    /// Free-form deadline text, when one was stated
    pub deadline: Option<String>,

    /// Priority inferred from the task wording
    pub priority: Priority,

    /// Current status
    pub status: ActionStatus,
}

/// Combined analysis result for one transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingInsights {
    /// Meeting title ("Untitled Meeting" when the caller gave none)
    pub title: String,

    /// Participants as supplied by the caller
    pub participants: Vec<String>,

    /// Condensed summary
    pub summary: String,

    /// Overall sentiment
    pub sentiment: SentimentType,

    /// Deduplicated, prioritized action items
    pub action_items: Vec<ActionItem>,

    /// When the analysis ran
    pub analyzed_at: DateTime<Utc>,
}
