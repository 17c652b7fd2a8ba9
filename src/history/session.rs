/// Interactive session state.
///
/// Holds what a front end shows: the current text buffer, the displayed
/// result, the history, and the loading/error flags. All mutation goes
/// through `&mut self`, so a second submit cannot start while one is in
/// flight.
use rand::Rng;

use super::History;
use crate::client::{self, Predictor};
use crate::error::Result;
use crate::metrics::AnalysisResult;

/// Sample Darija inputs offered to new users.
pub const EXAMPLE_PHRASES: [&str; 5] = [
    "هاد النهار زوين بزاف، فرحان بزاف",
    "ما عجبنيش هاد الفيلم، ضيعت غير الوقت",
    "الطعام كان بنين بزاف، غادي نرجع ليه",
    "خدمتي معاك كانت رائعة، شكرا بزاف",
    "هاد الخدمة صعيبة بزاف، ما قدرتش نكملها",
];

#[derive(Debug)]
pub struct Session<P> {
    predictor: P,
    text: String,
    result: Option<AnalysisResult>,
    history: History,
    show_history: bool,
    loading: bool,
    error: Option<String>,
}

impl<P: Predictor> Session<P> {
    pub fn new(predictor: P) -> Self {
        Self {
            predictor,
            text: String::new(),
            result: None,
            history: History::new(),
            show_history: false,
            loading: false,
            error: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Copy example phrase `index` into the text buffer.
    pub fn load_example(&mut self, index: usize) -> Option<&'static str> {
        let phrase = *EXAMPLE_PHRASES.get(index)?;
        self.text = phrase.to_string();
        Some(phrase)
    }

    /// Analyze the current text with the thread-local RNG.
    pub fn submit(&mut self) -> Result<&AnalysisResult> {
        self.submit_with(&mut rand::rng())
    }

    /// Analyze the current text. On success the result becomes the
    /// displayed one and is prepended to history. On failure the previous
    /// result stays on screen and [`error`](Self::error) holds the
    /// user-facing message. `loading` is false again on every exit.
    pub fn submit_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&AnalysisResult> {
        self.loading = true;
        self.error = None;

        let outcome = client::analyze_with(&self.predictor, &self.text, rng);
        self.loading = false;

        match outcome {
            Ok(result) => {
                self.history.append(result.clone());
                Ok(&*self.result.insert(result))
            }
            Err(e) => {
                self.error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// Replay history entry `index` (0 = newest) into the text buffer and
    /// the displayed result. Does not call the predictor.
    pub fn select_entry(&mut self, index: usize) -> Option<&AnalysisResult> {
        let entry = self.history.get(index)?.clone();
        self.text = entry.text.clone();
        self.error = None;
        Some(&*self.result.insert(entry))
    }

    /// Empty the history and close the history view.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.show_history = false;
    }

    /// Flip the history view; returns the new state.
    pub fn toggle_history(&mut self) -> bool {
        self.show_history = !self.show_history;
        self.show_history
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_history_shown(&self) -> bool {
        self.show_history
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RawPrediction;
    use crate::error::{AnalyzeError, EMPTY_TEXT_MESSAGE, RETRY_MESSAGE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Fixed(f64);

    impl Predictor for Fixed {
        fn predict(&self, _text: &str) -> Result<RawPrediction> {
            Ok(RawPrediction {
                positive_probability: self.0,
                negative_probability: 100.0 - self.0,
                prediction: u8::from(self.0 > 50.0),
            })
        }
    }

    struct Down;

    impl Predictor for Down {
        fn predict(&self, _text: &str) -> Result<RawPrediction> {
            Err(AnalyzeError::Transport("connection refused".to_string()))
        }
    }

    #[test]
    fn load_example_fills_text() {
        let mut s = Session::new(Fixed(90.0));
        assert_eq!(s.load_example(1), Some(EXAMPLE_PHRASES[1]));
        assert_eq!(s.text(), EXAMPLE_PHRASES[1]);
        assert!(s.load_example(EXAMPLE_PHRASES.len()).is_none());
        assert_eq!(s.text(), EXAMPLE_PHRASES[1]);
    }

    #[test]
    fn submit_success_updates_result_and_history() {
        let mut s = Session::new(Fixed(90.0));
        let mut rng = StdRng::seed_from_u64(1);
        s.set_text("زوين");
        s.submit_with(&mut rng).unwrap();
        assert!(!s.is_loading());
        assert!(s.error().is_none());
        assert_eq!(s.result().unwrap().text, "زوين");
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn validation_failure_sets_inline_message() {
        let mut s = Session::new(Fixed(90.0));
        s.set_text("   ");
        assert!(s.submit().is_err());
        assert!(!s.is_loading());
        assert_eq!(s.error(), Some(EMPTY_TEXT_MESSAGE));
        assert!(s.history().is_empty());
    }

    #[test]
    fn network_failure_keeps_previous_result() {
        let mut s = Session::new(Down);
        s.set_text("text");
        let err = s.submit().unwrap_err();
        assert!(err.is_network());
        assert!(!s.is_loading());
        assert_eq!(s.error(), Some(RETRY_MESSAGE));
        assert!(s.result().is_none());
    }

    #[test]
    fn clear_history_closes_view() {
        let mut s = Session::new(Fixed(20.0));
        s.set_text("a");
        s.submit().unwrap();
        assert!(s.toggle_history());
        s.clear_history();
        assert!(s.history().is_empty());
        assert!(!s.is_history_shown());
    }
}
