//! Prediction client.
//!
//! One analysis is one POST of `{ "text": ... }` to the prediction endpoint
//! (normally the gateway's `/api/predict`), followed by local enrichment in
//! [`crate::metrics`]. Empty input never leaves the process.
use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod http;

pub use http::PredictionClient;

use crate::error::{AnalyzeError, Result};
use crate::metrics::{self, AnalysisResult};

/// Classifier response. Probabilities are percentages (0–100).
///
/// No consistency check is made between the two probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub positive_probability: f64,
    pub negative_probability: f64,
    /// 1 = positive, 0 = negative.
    #[serde(default)]
    pub prediction: u8,
}

/// Anything that can turn text into a [`RawPrediction`].
pub trait Predictor {
    fn predict(&self, text: &str) -> Result<RawPrediction>;
}

/// Validate `text`, fetch a prediction, and derive display metrics using
/// `rng` for the synthesized values.
///
/// Whitespace-only input fails with [`AnalyzeError::Validation`] before the
/// predictor is touched. The untrimmed text is what gets sent and stored.
pub fn analyze_with<P, R>(predictor: &P, text: &str, rng: &mut R) -> Result<AnalysisResult>
where
    P: Predictor + ?Sized,
    R: Rng + ?Sized,
{
    if text.trim().is_empty() {
        return Err(AnalyzeError::Validation);
    }

    let raw = predictor.predict(text)?;
    Ok(metrics::derive(&raw, text, rng))
}

/// [`analyze_with`] using the thread-local RNG.
pub fn analyze<P: Predictor + ?Sized>(predictor: &P, text: &str) -> Result<AnalysisResult> {
    analyze_with(predictor, text, &mut rand::rng())
}
