//! Extractive summarizer.
//!
//! # Responsibility
//! - Split text into sentences and keep the highest-scoring ones.
//!
//! # Invariants
//! - Key points always appear in source order.
//! - When the sentence count fits the budget the input is returned verbatim.
//! - Equal scores keep source order (stable sort).

use crate::model::analysis::SummaryResult;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentence budget used when callers do not pick one.
pub const DEFAULT_MAX_SENTENCES: usize = 3;

static SENTENCE_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("valid sentence boundary regex"));

const KEYWORDS: &[&str] = &[
    "important",
    "significant",
    "key",
    "main",
    "primary",
    "essential",
    "crucial",
];

const EDGE_SENTENCE_BONUS: u32 = 2;
const LEAD_FRACTION: f64 = 0.3;
const MIN_INFORMATIVE_WORDS: usize = 10;
const MAX_INFORMATIVE_WORDS: usize = 30;

#[derive(Debug)]
struct ScoredSentence<'a> {
    index: usize,
    text: &'a str,
    score: u32,
}

/// Splits `text` on runs of `.`, `!` and `?`, returning trimmed, non-empty
/// sentences without their terminators.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY_RE
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Builds an extractive summary of at most `max_sentences` sentences.
///
/// A budget of `0` is treated as `1`.
pub fn summarize(text: &str, max_sentences: usize) -> SummaryResult {
    let budget = max_sentences.max(1);
    let sentences = split_sentences(text);
    let original_length = text.chars().count();

    if sentences.len() <= budget {
        return SummaryResult {
            original_length,
            summary_length: original_length,
            summary: text.to_string(),
            key_points: sentences.into_iter().map(str::to_string).collect(),
        };
    }

    let total = sentences.len();
    let mut scored = sentences
        .into_iter()
        .enumerate()
        .map(|(index, text)| ScoredSentence {
            index,
            text,
            score: score_sentence(text, index, total),
        })
        .collect::<Vec<_>>();

    // `sort_by` is stable, so ties keep source order.
    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored.truncate(budget);
    scored.sort_by_key(|sentence| sentence.index);

    let key_points = scored
        .iter()
        .map(|sentence| sentence.text.to_string())
        .collect::<Vec<_>>();
    let summary = format!("{}.", key_points.join(". "));
    let summary_length = summary.chars().count();

    debug!(
        "event=summarize module=text status=ok sentences={} selected={} original_chars={} summary_chars={}",
        total,
        key_points.len(),
        original_length,
        summary_length
    );

    SummaryResult {
        original_length,
        summary_length,
        summary,
        key_points,
    }
}

/// Scores one sentence by position, length and keyword hits.
///
/// Each distinct keyword found as a case-insensitive substring adds 1 point.
/// Repeats of the same keyword add nothing, and "remain" counts for "main".
fn score_sentence(sentence: &str, index: usize, total: usize) -> u32 {
    let mut score = 0;

    if index == 0 || index + 1 == total {
        score += EDGE_SENTENCE_BONUS;
    }
    if (index as f64) < total as f64 * LEAD_FRACTION {
        score += 1;
    }

    let words = sentence.split_whitespace().count();
    if (MIN_INFORMATIVE_WORDS..=MAX_INFORMATIVE_WORDS).contains(&words) {
        score += 1;
    }

    let lowered = sentence.to_lowercase();
    score += KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as u32;

    score
}
