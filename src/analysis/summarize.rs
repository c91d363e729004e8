//! Summarization orchestration
//!
//! Bounded-length summaries for arbitrary-length transcripts: short input is
//! summarized in one model call, long input is chunked, summarized per chunk
//! and combined with a second pass. A frequency-based extractive summarizer
//! covers every model failure, so callers always get a summary back.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;

use crate::capability::Summarizer;
use crate::text;

/// Words per chunk when summarizing long transcripts.
const CHUNK_WORDS: usize = 1000;

/// Minimum summary length for single-pass and combining calls.
const MIN_SUMMARY_LENGTH: usize = 50;

/// Minimum summary length for per-chunk calls.
const MIN_CHUNK_SUMMARY_LENGTH: usize = 30;

/// Produces a summary for one transcript.
pub struct SummarizationOrchestrator {
    summarizer: Arc<dyn Summarizer>,
}

impl SummarizationOrchestrator {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self { summarizer }
    }

    /// Summarize `transcript` to roughly `max_length` length.
    ///
    /// Never fails: when the model path errors, the extractive fallback runs
    /// on the full normalized transcript (never on partial chunk summaries).
    pub async fn summarize(&self, transcript: &str, max_length: usize) -> String {
        let normalized = text::normalize(transcript);

        match self.model_summary(&normalized, max_length).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Model summarization failed ({e:#}), using extractive fallback");
                extractive_summary(&normalized, max_length)
            }
        }
    }

    async fn model_summary(&self, normalized: &str, max_length: usize) -> Result<String> {
        if text::word_count(normalized) <= CHUNK_WORDS {
            let summary = self
                .summarizer
                .summarize(normalized, MIN_SUMMARY_LENGTH, max_length)
                .await?;
            return Ok(summary);
        }

        let chunks = text::split_words(normalized, CHUNK_WORDS)?;
        let per_chunk_length = max_length / chunks.len();

        let mut chunk_summaries = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!("Summarizing chunk {}/{}", i + 1, chunks.len());
            let summary = self
                .summarizer
                .summarize(chunk, MIN_CHUNK_SUMMARY_LENGTH, per_chunk_length)
                .await?;
            chunk_summaries.push(summary);
        }

        let combined = chunk_summaries.join(" ");
        let final_summary = self
            .summarizer
            .summarize(&combined, MIN_SUMMARY_LENGTH, max_length)
            .await?;

        Ok(final_summary)
    }
}

/// Extractive fallback summarizer.
///
/// Scores sentences by the frequency of their longer words and greedily
/// keeps the highest-scoring ones while the accumulated sentence length
/// stays within `max_length` characters. Ties keep transcript order. When
/// nothing fits, the first three raw sentences are returned instead.
pub fn extractive_summary(transcript: &str, max_length: usize) -> String {
    let sentences = text::split_sentences(transcript);

    let mut word_freq: HashMap<String, usize> = HashMap::new();
    for sentence in &sentences {
        for word in sentence.to_lowercase().split_whitespace() {
            if word.chars().count() > 3 {
                *word_freq.entry(word.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut scored: Vec<(usize, &str)> = sentences
        .iter()
        .map(|sentence| {
            let score = sentence
                .split_whitespace()
                .filter(|w| w.chars().count() > 3)
                .map(|w| word_freq.get(&w.to_lowercase()).copied().unwrap_or(0))
                .sum();
            (score, sentence.as_str())
        })
        .collect();

    // Stable sort: equal scores keep transcript order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut chosen = Vec::new();
    let mut current_length = 0;
    for (_, sentence) in &scored {
        let sentence_length = sentence.chars().count();
        if current_length + sentence_length > max_length {
            break;
        }
        chosen.push(*sentence);
        current_length += sentence_length;
    }

    if chosen.is_empty() {
        let raw: Vec<&str> = transcript.split('.').take(3).collect();
        return format!("{}.", raw.join(". "));
    }

    format!("{}.", chosen.join(". "))
}
