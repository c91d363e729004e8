//! Action-item extraction
//!
//! Three pattern matchers plus an optional entity-assisted matcher run over
//! the raw transcript. Their candidates are merged in discovery order,
//! cleaned, deduplicated by task text, prioritized by keyword and truncated.
//! Matching happens on the un-normalized transcript so that wording the
//! normalizer would alter stays matchable.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::analysis::{ActionItem, ActionStatus, Priority};
use crate::capability::EntityRecognizer;

/// Maximum action items returned per transcript.
const MAX_ACTION_ITEMS: usize = 10;

/// Minimum cleaned task length in characters.
const MIN_TASK_LENGTH: usize = 6;

/// Cap on candidates from the entity-assisted matcher. One scoped scan runs
/// per recognized person, so a transcript dense with names could otherwise
/// flood the candidate list.
const MAX_ENTITY_CANDIDATES: usize = 25;

/// Task keywords that mark an item high priority.
const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "critical",
    "emergency",
    "important",
    "priority",
    "deadline",
    "due",
];

/// Task keywords that mark an item low priority.
const LOW_PRIORITY_KEYWORDS: &[&str] = &["optional", "nice to have", "when possible"];

/// Which matcher produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// "<name> will/should/needs to <task> [by <deadline>]"
    ModalObligation,
    /// "action item/todo/task: <name> - <task>"
    LabeledItem,
    /// "assign: <name> - <task>"
    ExplicitAssignment,
    /// Modal-obligation clause anchored at a recognized person name
    EntityAssisted,
}

/// A provisional action item before cleanup, dedup and prioritization.
#[derive(Debug, Clone)]
struct Candidate {
    task: String,
    assignee: Option<String>,
    deadline: Option<String>,
    source: MatcherKind,
}

fn modal_obligation_regex() -> &'static Regex {
    static MODAL_RE: OnceLock<Regex> = OnceLock::new();
    MODAL_RE.get_or_init(|| {
        Regex::new(r"(?i)(\w+)\s+(?:will|should|needs?\s+to|has\s+to)\s+([^.!?]+?)(?:\s+by\s+([^.!?]+))?[.!?]")
            .expect("modal obligation regex must compile")
    })
}

fn labeled_item_regex() -> &'static Regex {
    static LABELED_RE: OnceLock<Regex> = OnceLock::new();
    LABELED_RE.get_or_init(|| {
        Regex::new(r"(?i)(?:action\s+item|todo|task)[:\s]*(\w+)[\s-]+([^.!?]+)[.!?]")
            .expect("labeled item regex must compile")
    })
}

fn explicit_assignment_regex() -> &'static Regex {
    static ASSIGN_RE: OnceLock<Regex> = OnceLock::new();
    ASSIGN_RE.get_or_init(|| {
        Regex::new(r"(?i)assign[:\s]*(\w+)[\s-]+([^.!?]+)[.!?]")
            .expect("explicit assignment regex must compile")
    })
}

/// Extracts action items from one transcript.
pub struct ActionItemExtractor {
    entities: Option<Arc<dyn EntityRecognizer>>,
}

impl ActionItemExtractor {
    /// Create an extractor. Without a recognizer only the pattern matchers
    /// run, which is a valid configuration.
    pub fn new(entities: Option<Arc<dyn EntityRecognizer>>) -> Self {
        Self { entities }
    }

    /// Extract at most ten deduplicated, prioritized action items.
    ///
    /// Items come back in discovery order: modal obligations first, then
    /// labeled items, explicit assignments and entity-assisted matches.
    /// Never fails; a transcript with nothing to find yields an empty vec.
    pub async fn extract(&self, transcript: &str) -> Vec<ActionItem> {
        let mut candidates = Vec::new();

        collect_modal_obligations(transcript, &mut candidates);
        collect_labeled_items(transcript, &mut candidates);
        collect_explicit_assignments(transcript, &mut candidates);

        if let Some(recognizer) = &self.entities {
            match recognizer.recognize(transcript).await {
                Ok(spans) => {
                    let persons: Vec<&str> = distinct_persons(&spans);
                    collect_entity_assisted(transcript, &persons, &mut candidates);
                }
                Err(e) => {
                    tracing::debug!("NER unavailable ({e}), skipping entity-assisted matching");
                }
            }
        }

        tracing::debug!("Collected {} action-item candidates", candidates.len());
        finalize(candidates)
    }
}

fn collect_modal_obligations(transcript: &str, candidates: &mut Vec<Candidate>) {
    for caps in modal_obligation_regex().captures_iter(transcript) {
        candidates.push(Candidate {
            task: caps[2].trim().to_string(),
            assignee: Some(caps[1].trim().to_string()),
            deadline: caps.get(3).map(|m| m.as_str().trim().to_string()),
            source: MatcherKind::ModalObligation,
        });
    }
}

fn collect_labeled_items(transcript: &str, candidates: &mut Vec<Candidate>) {
    for caps in labeled_item_regex().captures_iter(transcript) {
        candidates.push(Candidate {
            task: caps[2].trim().to_string(),
            assignee: Some(caps[1].trim().to_string()),
            deadline: None,
            source: MatcherKind::LabeledItem,
        });
    }
}

fn collect_explicit_assignments(transcript: &str, candidates: &mut Vec<Candidate>) {
    for caps in explicit_assignment_regex().captures_iter(transcript) {
        candidates.push(Candidate {
            task: caps[2].trim().to_string(),
            assignee: Some(caps[1].trim().to_string()),
            deadline: None,
            source: MatcherKind::ExplicitAssignment,
        });
    }
}

/// First occurrence of each person name, discovery order preserved.
fn distinct_persons(spans: &[crate::capability::EntitySpan]) -> Vec<&str> {
    let mut seen = HashSet::new();
    spans
        .iter()
        .filter(|s| s.is_person())
        .map(|s| s.text.as_str())
        .filter(|name| !name.trim().is_empty() && seen.insert(name.to_lowercase()))
        .collect()
}

fn collect_entity_assisted(transcript: &str, persons: &[&str], candidates: &mut Vec<Candidate>) {
    let mut emitted = 0;

    for person in persons {
        if emitted >= MAX_ENTITY_CANDIDATES {
            tracing::debug!("Entity-assisted candidate cap reached, skipping remaining persons");
            break;
        }

        let pattern = format!(
            r"(?i){}[^.!?]*?(?:will|should|needs?\s+to|has\s+to)\s+([^.!?]+)[.!?]",
            regex::escape(person)
        );
        let scoped = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                tracing::debug!("Skipping scoped pattern for {person}: {e}");
                continue;
            }
        };

        for caps in scoped.captures_iter(transcript) {
            if emitted >= MAX_ENTITY_CANDIDATES {
                break;
            }
            candidates.push(Candidate {
                task: caps[1].trim().to_string(),
                assignee: Some(person.to_string()),
                deadline: None,
                source: MatcherKind::EntityAssisted,
            });
            emitted += 1;
        }
    }
}

/// Cleanup, minimum-length filter, dedup, prioritization, truncation.
fn finalize(candidates: Vec<Candidate>) -> Vec<ActionItem> {
    let mut seen_tasks = HashSet::new();
    let mut items = Vec::new();

    for candidate in candidates {
        let task = clean_task(&candidate.task);
        if task.chars().count() < MIN_TASK_LENGTH {
            continue;
        }

        // First matcher to find a task wins; later duplicates are dropped
        // even when they carry a different assignee.
        if !seen_tasks.insert(task.to_lowercase()) {
            tracing::trace!("Dropping duplicate {:?} candidate: {task}", candidate.source);
            continue;
        }

        items.push(ActionItem {
            priority: classify_priority(&task),
            task,
            assignee: candidate.assignee,
            deadline: candidate.deadline,
            status: ActionStatus::Pending,
        });

        if items.len() == MAX_ACTION_ITEMS {
            break;
        }
    }

    items
}

/// Strip one leading filler prefix, trailing sentence punctuation, and
/// surrounding whitespace from a task clause.
fn clean_task(task: &str) -> String {
    let task = task.trim();

    let lower = task.to_lowercase();
    let task = ["to ", "that ", "the "]
        .iter()
        .find(|prefix| lower.starts_with(*prefix))
        .map(|prefix| &task[prefix.len()..])
        .unwrap_or(task);

    task.trim_end_matches(['.', '!', '?']).trim().to_string()
}

/// Keyword-tier priority: high beats low, first matching tier wins.
fn classify_priority(task: &str) -> Priority {
    let task = task.to_lowercase();

    if HIGH_PRIORITY_KEYWORDS.iter().any(|k| task.contains(k)) {
        Priority::High
    } else if LOW_PRIORITY_KEYWORDS.iter().any(|k| task.contains(k)) {
        Priority::Low
    } else {
        Priority::Medium
    }
}
