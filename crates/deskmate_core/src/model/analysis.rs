//! Value objects returned by the text-analysis functions.

use serde::{Deserialize, Serialize};

/// Polarity bucket derived from the normalized sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

/// The five tracked emotion dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
}

impl Emotion {
    /// All dimensions in reporting order.
    pub const ALL: [Emotion; 5] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
        }
    }
}

/// Relative emotion intensities.
///
/// After normalization the dominant dimension is `1.0`, or every dimension
/// is `0.0` when no emotion word was seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub joy: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
        }
    }

    pub fn get_mut(&mut self, emotion: Emotion) -> &mut f64 {
        match emotion {
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Anger => &mut self.anger,
            Emotion::Fear => &mut self.fear,
            Emotion::Surprise => &mut self.surprise,
        }
    }

    pub fn max(&self) -> f64 {
        Emotion::ALL
            .iter()
            .map(|emotion| self.get(*emotion))
            .fold(0.0, f64::max)
    }

    /// First dimension (in `Emotion::ALL` order) holding the maximum, if any
    /// dimension is non-zero.
    pub fn dominant(&self) -> Option<Emotion> {
        let max = self.max();
        if max <= 0.0 {
            return None;
        }
        Emotion::ALL
            .into_iter()
            .find(|emotion| self.get(*emotion) == max)
    }
}

/// Output of `text::sentiment::analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Net polarity divided by token count; not clamped.
    pub score: f64,
    pub label: SentimentLabel,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub emotions: EmotionScores,
}

impl SentimentResult {
    pub fn dominant_emotion(&self) -> Option<Emotion> {
        self.emotions.dominant()
    }
}

/// Output of `text::summarizer::summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// Character count of the input text.
    pub original_length: usize,
    /// Character count of `summary`.
    pub summary_length: usize,
    pub summary: String,
    /// Selected sentences in source order.
    pub key_points: Vec<String>,
}

impl SummaryResult {
    /// Renders the plain-text export offered by the summary download action.
    pub fn to_report(&self) -> String {
        let mut report = format!(
            "Original Text Length: {} characters\nSummary Length: {} characters\n\nSummary:\n{}\n\nKey Points:\n",
            self.original_length, self.summary_length, self.summary
        );
        let points = self
            .key_points
            .iter()
            .enumerate()
            .map(|(index, point)| format!("{}. {}", index + 1, point))
            .collect::<Vec<_>>()
            .join("\n");
        report.push_str(&points);
        report
    }
}
