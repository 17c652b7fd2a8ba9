//! Client and proxy gateway for a Darija (Moroccan Arabic) sentiment
//! classifier.
//!
//! The classifier is an external HTTP service returning a positive and a
//! negative probability. This crate forwards requests to it
//! ([`gateway`]), calls it ([`client`]), turns its answer into display
//! metrics ([`metrics`]), and keeps a per-session history ([`history`]).

pub mod cli;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gateway;
pub mod history;
pub mod metrics;

pub use client::{PredictionClient, Predictor, RawPrediction};
pub use error::{AnalyzeError, Result};
pub use metrics::AnalysisResult;
