/// Emotion channels synthesized from the two classifier probabilities.
///
/// Each channel draws one uniform value and scales it by a fixed weight
/// times the probability it tracks (or a constant, for `surprise`). The raw
/// values are then normalized so the eight scores sum to exactly 100.0 at
/// one-decimal precision.
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The eight emotion names, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Trust,
    Anticipation,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Disgust,
        Emotion::Trust,
        Emotion::Anticipation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Disgust => "disgust",
            Self::Trust => "trust",
            Self::Anticipation => "anticipation",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which input a channel is scaled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Positive,
    Negative,
    /// Not tied to either probability.
    Constant,
}

impl Source {
    pub(crate) fn magnitude(self, positive: f64, negative: f64) -> f64 {
        match self {
            Self::Positive => positive,
            Self::Negative => negative,
            Self::Constant => 1.0,
        }
    }
}

/// Channel table: emotion, source, weight.
pub const CHANNELS: [(Emotion, Source, f64); 8] = [
    (Emotion::Joy, Source::Positive, 0.5),
    (Emotion::Sadness, Source::Negative, 0.5),
    (Emotion::Anger, Source::Negative, 0.3),
    (Emotion::Fear, Source::Negative, 0.2),
    (Emotion::Surprise, Source::Constant, 10.0),
    (Emotion::Disgust, Source::Negative, 0.1),
    (Emotion::Trust, Source::Positive, 0.3),
    (Emotion::Anticipation, Source::Positive, 0.2),
];

/// Normalized emotion scores. Each value is in [0, 100] with one decimal,
/// and the eight values sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub joy: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
    pub disgust: f64,
    pub trust: f64,
    pub anticipation: f64,
}

impl EmotionScores {
    fn from_array(v: [f64; 8]) -> Self {
        Self {
            joy: v[0],
            sadness: v[1],
            anger: v[2],
            fear: v[3],
            surprise: v[4],
            disgust: v[5],
            trust: v[6],
            anticipation: v[7],
        }
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Anger => self.anger,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Disgust => self.disgust,
            Emotion::Trust => self.trust,
            Emotion::Anticipation => self.anticipation,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// The highest-scoring emotion. Ties go to the earlier channel.
    pub fn dominant(&self) -> Emotion {
        self.iter()
            .fold((Emotion::Joy, f64::MIN), |best, (e, v)| {
                if v > best.1 { (e, v) } else { best }
            })
            .0
    }
}

/// Draw and normalize the eight channels for one analysis.
///
/// `positive` and `negative` must already be sanitized (finite, >= 0).
pub fn synthesize<R: Rng + ?Sized>(positive: f64, negative: f64, rng: &mut R) -> EmotionScores {
    let raw = CHANNELS.map(|(_, source, weight)| {
        let u: f64 = rng.random();
        u * source.magnitude(positive, negative) * weight
    });
    EmotionScores::from_array(normalize(raw))
}

/// Scale `raw` to percentages rounded to tenths, distributing rounding
/// slack by largest remainder so the result sums to exactly 100.0.
///
/// An all-zero (or non-finite) total falls back to an even split.
pub fn normalize(raw: [f64; 8]) -> [f64; 8] {
    const TENTHS: u32 = 1000;

    let total: f64 = raw.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return [100.0 / 8.0; 8];
    }

    let exact = raw.map(|r| r / total * f64::from(TENTHS));
    let mut tenths = exact.map(|e| e.floor() as u32);

    let assigned: u32 = tenths.iter().sum();
    let mut leftover = TENTHS.saturating_sub(assigned);

    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for i in order {
        if leftover == 0 {
            break;
        }
        tenths[i] += 1;
        leftover -= 1;
    }

    tenths.map(|t| f64::from(t) / 10.0)
}
