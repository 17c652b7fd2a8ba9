//! In-memory analysis history.
//!
//! Newest first, unbounded, and owned by one [`Session`]; nothing is
//! persisted, so history ends with the process.
use std::collections::VecDeque;

use crate::metrics::AnalysisResult;

pub mod session;

pub use session::{EXAMPLE_PHRASES, Session};

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<AnalysisResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at index 0.
    pub fn append(&mut self, result: AnalysisResult) {
        self.entries.push_front(result);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entry `index`, where 0 is the most recent.
    pub fn get(&self, index: usize) -> Option<&AnalysisResult> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter()
    }
}
