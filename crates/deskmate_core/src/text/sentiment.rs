//! Lexicon-based sentiment and emotion scoring.
//!
//! # Responsibility
//! - Tokenize text and count hits against fixed polarity/emotion lexicons.
//! - Map the normalized polarity to a label plus confidence.
//!
//! # Invariants
//! - `confidence` is always within `[0, 1]`.
//! - Emotion scores are within `[0, 1]`; the dominant one is `1.0` unless all
//!   are zero.
//! - Emotion lexicons are checked independently, so overlapping lists would
//!   credit one token to several emotions.

use crate::model::analysis::{Emotion, EmotionScores, SentimentLabel, SentimentResult};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII word class on purpose; letters outside it split tokens.
static NON_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("valid non-word regex"));

/// Scores strictly above this are positive; strictly below its negation are
/// negative.
pub const POLARITY_THRESHOLD: f64 = 0.05;
const CONFIDENCE_SCALE: f64 = 10.0;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "fantastic",
    "awesome",
    "love",
    "happy",
    "joy",
    "pleased",
    "satisfied",
    "perfect",
    "brilliant",
    "outstanding",
    "superb",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "horrible",
    "hate",
    "disgusting",
    "worst",
    "angry",
    "sad",
    "disappointed",
    "frustrated",
    "annoyed",
    "upset",
    "furious",
    "depressed",
];

const JOY_WORDS: &[&str] = &[
    "happy",
    "joy",
    "excited",
    "thrilled",
    "delighted",
    "cheerful",
    "elated",
    "wonderful",
    "amazing",
    "glad",
];
const SADNESS_WORDS: &[&str] = &[
    "sad",
    "depressed",
    "melancholy",
    "gloomy",
    "sorrowful",
    "downhearted",
];
const ANGER_WORDS: &[&str] = &[
    "angry",
    "furious",
    "rage",
    "mad",
    "irritated",
    "annoyed",
    "outraged",
];
const FEAR_WORDS: &[&str] = &[
    "afraid",
    "scared",
    "terrified",
    "anxious",
    "worried",
    "nervous",
    "frightened",
];
const SURPRISE_WORDS: &[&str] = &[
    "surprised",
    "amazed",
    "astonished",
    "shocked",
    "stunned",
    "bewildered",
];

fn emotion_lexicon(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Joy => JOY_WORDS,
        Emotion::Sadness => SADNESS_WORDS,
        Emotion::Anger => ANGER_WORDS,
        Emotion::Fear => FEAR_WORDS,
        Emotion::Surprise => SURPRISE_WORDS,
    }
}

/// Lowercases `text` and splits it on runs of non-word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_WORD_RE
        .split(&text.to_lowercase())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classifies the polarity and emotional tone of `text`.
pub fn analyze(text: &str) -> SentimentResult {
    let tokens = tokenize(text);

    let mut positive = 0usize;
    let mut negative = 0usize;
    let mut emotions = EmotionScores::default();

    for token in &tokens {
        let token = token.as_str();
        if POSITIVE_WORDS.contains(&token) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&token) {
            negative += 1;
        }
        for emotion in Emotion::ALL {
            if emotion_lexicon(emotion).contains(&token) {
                *emotions.get_mut(emotion) += 1.0;
            }
        }
    }

    let score = if tokens.is_empty() {
        0.0
    } else {
        (positive as f64 - negative as f64) / tokens.len() as f64
    };
    let (label, confidence) = classify(score);
    normalize_emotions(&mut emotions);

    debug!(
        "event=sentiment module=text status=ok tokens={} positive={} negative={} label={}",
        tokens.len(),
        positive,
        negative,
        label.as_str()
    );

    SentimentResult {
        score,
        label,
        confidence,
        emotions,
    }
}

fn classify(score: f64) -> (SentimentLabel, f64) {
    let magnitude = (score.abs() * CONFIDENCE_SCALE).min(1.0);
    if score > POLARITY_THRESHOLD {
        (SentimentLabel::Positive, magnitude)
    } else if score < -POLARITY_THRESHOLD {
        (SentimentLabel::Negative, magnitude)
    } else {
        (SentimentLabel::Neutral, (1.0 - magnitude).clamp(0.0, 1.0))
    }
}

fn normalize_emotions(emotions: &mut EmotionScores) {
    let max = emotions.max();
    if max <= 0.0 {
        return;
    }
    for emotion in Emotion::ALL {
        *emotions.get_mut(emotion) /= max;
    }
}
