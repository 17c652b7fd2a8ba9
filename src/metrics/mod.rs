//! Derived metrics for display.
//!
//! The classifier only returns a positive and a negative probability. This
//! module turns those two numbers into a richer, presentation-only result:
//! eight emotion scores and five keyword saliences. None of it is real
//! inference. Values are pseudo-random by design and only their shape is
//! stable (weights, channel groupings, sums, ordering).
//!
//! Probabilities are on the percentage scale (0–100) throughout.
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod emotions;
pub mod keywords;

pub use emotions::{Emotion, EmotionScores};
pub use keywords::Keyword;

use crate::client::RawPrediction;

/// Positive percentage above which a result is worth celebrating.
pub const CELEBRATION_THRESHOLD: f64 = 75.0;

/// A classifier response enriched for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub positive: f64,
    pub negative: f64,
    pub emotions: EmotionScores,
    /// Highest score first.
    pub keywords: Vec<Keyword>,
    /// ISO-8601 creation time, UTC.
    pub timestamp: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "Positive"),
            Self::Negative => write!(f, "Negative"),
        }
    }
}

/// A grouped emotion bar ("Trust & Joy" etc.).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub label: &'static str,
    pub value: f64,
}

impl AnalysisResult {
    /// `Positive` only when the positive share strictly exceeds the negative.
    pub fn sentiment(&self) -> Sentiment {
        if self.positive > self.negative {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// The larger of the two percentages.
    pub fn confidence(&self) -> f64 {
        self.positive.max(self.negative)
    }

    pub fn is_celebration(&self) -> bool {
        self.positive > CELEBRATION_THRESHOLD
    }

    pub fn indicators(&self) -> [Indicator; 3] {
        let e = &self.emotions;
        [
            Indicator {
                label: "Trust & Joy",
                value: e.trust + e.joy,
            },
            Indicator {
                label: "Anticipation",
                value: e.anticipation + e.surprise,
            },
            Indicator {
                label: "Anger & Fear",
                value: e.anger + e.fear,
            },
        ]
    }
}

/// Build the display result for `raw`, stamped with the current time.
pub fn derive<R: Rng + ?Sized>(raw: &RawPrediction, text: &str, rng: &mut R) -> AnalysisResult {
    derive_at(raw, text, Utc::now(), rng)
}

/// [`derive`] with an explicit creation time.
///
/// Emotion channels are drawn before keywords, so a seeded `rng` yields a
/// reproducible result.
pub fn derive_at<R: Rng + ?Sized>(
    raw: &RawPrediction,
    text: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> AnalysisResult {
    let pos = sanitize(raw.positive_probability);
    let neg = sanitize(raw.negative_probability);

    let emotions = emotions::synthesize(pos, neg, rng);
    let keywords = keywords::score_keywords(pos, neg, rng);

    AnalysisResult {
        positive: raw.positive_probability,
        negative: raw.negative_probability,
        emotions,
        keywords,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        text: text.to_string(),
    }
}

/// Negative and non-finite probabilities contribute nothing.
fn sanitize(p: f64) -> f64 {
    if p.is_finite() && p > 0.0 { p } else { 0.0 }
}
