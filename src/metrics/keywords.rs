/// Demo keyword saliences.
///
/// The vocabulary is fixed and does not depend on the analyzed text; only
/// the scores move, scaled by the probability each word is associated with.
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::emotions::Source;

/// Fixed vocabulary: three positive words, two negative.
pub const VOCABULARY: [(&str, Source); 5] = [
    ("زوين", Source::Positive),
    ("مزيان", Source::Positive),
    ("فرحان", Source::Positive),
    ("حزين", Source::Negative),
    ("غاضب", Source::Negative),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub text: String,
    pub score: f64,
}

/// Score every vocabulary word and return them highest first.
pub fn score_keywords<R: Rng + ?Sized>(positive: f64, negative: f64, rng: &mut R) -> Vec<Keyword> {
    let mut keywords: Vec<Keyword> = VOCABULARY
        .iter()
        .map(|&(text, source)| {
            let u: f64 = rng.random();
            Keyword {
                text: text.to_string(),
                score: u * source.magnitude(positive, negative),
            }
        })
        .collect();

    keywords.sort_by(|a, b| b.score.total_cmp(&a.score));
    keywords
}
