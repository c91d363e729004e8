use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use recap::analysis::{
    Pipeline, Priority, SentimentAggregator, SentimentType, SummarizationOrchestrator,
    TranscriptRequest,
};
use recap::capability::{
    CapabilityError, CapabilityRegistry, CapabilitySet, SentimentClassifier, SentimentPrediction,
    Summarizer,
};

struct CountingSummarizer {
    calls: AtomicUsize,
}

impl CountingSummarizer {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    async fn summarize(
        &self,
        _text: &str,
        _min_length: usize,
        _max_length: usize,
    ) -> Result<String, CapabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("the team reviewed progress and agreed on next steps".to_string())
    }
}

struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(
        &self,
        _text: &str,
        _min_length: usize,
        _max_length: usize,
    ) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unavailable("summarizer offline".to_string()))
    }
}

/// Returns the scripted predictions in order, then repeats the last one.
struct ScriptedClassifier {
    predictions: Vec<SentimentPrediction>,
    next: AtomicUsize,
}

impl ScriptedClassifier {
    fn new(predictions: Vec<(&str, f64)>) -> Arc<Self> {
        Arc::new(Self {
            predictions: predictions
                .into_iter()
                .map(|(label, score)| SentimentPrediction {
                    label: label.to_string(),
                    score,
                })
                .collect(),
            next: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SentimentClassifier for ScriptedClassifier {
    async fn classify(&self, _text: &str) -> Result<SentimentPrediction, CapabilityError> {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        let i = i.min(self.predictions.len() - 1);
        Ok(self.predictions[i].clone())
    }
}

struct FailingClassifier;

#[async_trait]
impl SentimentClassifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<SentimentPrediction, CapabilityError> {
        Err(CapabilityError::Unavailable("classifier offline".to_string()))
    }
}

fn words(n: usize) -> String {
    vec!["status"; n].join(" ")
}

#[tokio::test]
async fn short_input_issues_exactly_one_summarizer_call() {
    let summarizer = CountingSummarizer::new();
    let orchestrator = SummarizationOrchestrator::new(summarizer.clone());

    orchestrator.summarize(&words(1000), 150).await;

    assert_eq!(summarizer.call_count(), 1);
}

#[tokio::test]
async fn long_input_issues_chunk_calls_plus_combining_call() {
    let summarizer = CountingSummarizer::new();
    let orchestrator = SummarizationOrchestrator::new(summarizer.clone());

    // 2500 words -> 3 chunks of up to 1000 words, plus one combining call.
    orchestrator.summarize(&words(2500), 150).await;

    assert_eq!(summarizer.call_count(), 4);
}

#[tokio::test]
async fn summarizer_failure_falls_back_to_extractive_summary() {
    let orchestrator = SummarizationOrchestrator::new(Arc::new(FailingSummarizer));

    let transcript = "The release plan covers the rollout. The rollout plan needs sign-off. \
                      Snacks were provided.";
    let summary = orchestrator.summarize(transcript, 150).await;

    assert!(!summary.is_empty());
    assert!(summary.contains("rollout"));
}

#[tokio::test]
async fn short_input_sentiment_uses_single_label() {
    let classifier = ScriptedClassifier::new(vec![("POSITIVE", 0.98)]);
    let aggregator = SentimentAggregator::new(classifier);

    let sentiment = aggregator.analyze("Great progress all around.").await;
    assert_eq!(sentiment, SentimentType::Positive);
}

#[tokio::test]
async fn chunked_sentiment_sums_scores_across_chunks() {
    // 1200 words -> 3 chunks: positive 0.9, negative 0.3, negative 0.3.
    let classifier =
        ScriptedClassifier::new(vec![("positive", 0.9), ("negative", 0.3), ("negative", 0.3)]);
    let aggregator = SentimentAggregator::new(classifier);

    let sentiment = aggregator.analyze(&words(1200)).await;
    assert_eq!(sentiment, SentimentType::Positive);
}

#[tokio::test]
async fn tied_chunk_scores_resolve_to_neutral() {
    // 600 words -> 2 chunks scoring positive 0.5 and negative 0.5.
    let classifier = ScriptedClassifier::new(vec![("positive", 0.5), ("negative", 0.5)]);
    let aggregator = SentimentAggregator::new(classifier);

    let sentiment = aggregator.analyze(&words(600)).await;
    assert_eq!(sentiment, SentimentType::Neutral);
}

#[tokio::test]
async fn classifier_failure_degrades_to_neutral() {
    let aggregator = SentimentAggregator::new(Arc::new(FailingClassifier));

    let sentiment = aggregator.analyze("Everything is on fire.").await;
    assert_eq!(sentiment, SentimentType::Neutral);
}

#[tokio::test]
async fn pipeline_assembles_all_three_analyses() {
    let registry = CapabilityRegistry::with_capabilities(CapabilitySet {
        summarizer: CountingSummarizer::new(),
        sentiment: ScriptedClassifier::new(vec![("positive", 0.9)]),
        entities: None,
    });
    let pipeline = Pipeline::new(&registry, 150);

    let insights = pipeline
        .process(TranscriptRequest {
            transcript: "John will prepare the report by Friday. Mary should review the budget."
                .to_string(),
            title: None,
            participants: vec!["John".to_string(), "Mary".to_string()],
        })
        .await;

    assert_eq!(insights.title, "Untitled Meeting");
    assert_eq!(insights.sentiment, SentimentType::Positive);
    assert!(!insights.summary.is_empty());

    assert_eq!(insights.action_items.len(), 2);

    let first = &insights.action_items[0];
    assert_eq!(first.task, "prepare the report");
    assert_eq!(first.assignee.as_deref(), Some("John"));
    assert_eq!(first.deadline.as_deref(), Some("Friday"));
    assert_eq!(first.priority, Priority::Medium);

    let second = &insights.action_items[1];
    assert_eq!(second.task, "review the budget");
    assert_eq!(second.assignee.as_deref(), Some("Mary"));
    assert_eq!(second.deadline, None);
    assert_eq!(second.priority, Priority::Medium);
}

#[tokio::test]
async fn pipeline_survives_every_capability_failing() {
    let registry = CapabilityRegistry::with_capabilities(CapabilitySet {
        summarizer: Arc::new(FailingSummarizer),
        sentiment: Arc::new(FailingClassifier),
        entities: None,
    });
    let pipeline = Pipeline::new(&registry, 150);

    let insights = pipeline
        .process(TranscriptRequest {
            transcript: "The launch slipped again. Sam will draft the recovery plan.".to_string(),
            title: Some("Postmortem".to_string()),
            participants: Vec::new(),
        })
        .await;

    assert_eq!(insights.title, "Postmortem");
    assert!(!insights.summary.is_empty(), "fallback summary expected");
    assert_eq!(insights.sentiment, SentimentType::Neutral);
    assert_eq!(insights.action_items.len(), 1);
    assert_eq!(insights.action_items[0].task, "draft the recovery plan");
}
