//! Terminal rendering for analysis results and history.
use colored::Colorize;

use crate::history::History;
use crate::metrics::{AnalysisResult, Sentiment};

const BAR_WIDTH: usize = 30;

/// A fixed-width bar for a percentage. Out-of-range values are clamped.
pub fn bar(pct: f64, width: usize) -> String {
    let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn print_result(result: &AnalysisResult) {
    let (headline, face) = match result.sentiment() {
        Sentiment::Positive => (
            format!("{} Sentiment Detected", result.sentiment()).green().bold(),
            "😊",
        ),
        Sentiment::Negative => (
            format!("{} Sentiment Detected", result.sentiment()).red().bold(),
            "😔",
        ),
    };
    println!();
    println!("{}  {:.0}% {}", headline, result.confidence(), face);
    println!("{}", "=".repeat(50));

    println!(
        "  {:<10} {} {:>4.0}%",
        "Negative",
        bar(result.negative, BAR_WIDTH).red(),
        result.negative
    );
    println!(
        "  {:<10} {} {:>4.0}%",
        "Positive",
        bar(result.positive, BAR_WIDTH).green(),
        result.positive
    );

    println!();
    println!(
        "{}  (dominant: {})",
        "Emotions".bold(),
        result.emotions.dominant()
    );
    for (emotion, value) in result.emotions.iter() {
        println!(
            "  {:<13} {:>5.1}  {}",
            emotion.name(),
            value,
            bar(value, BAR_WIDTH).cyan()
        );
    }

    println!();
    println!("{}", "Indicators".bold());
    for indicator in result.indicators() {
        println!(
            "  {:<13} {:>5.1}  {}",
            indicator.label,
            indicator.value,
            bar(indicator.value, BAR_WIDTH).magenta()
        );
    }

    println!();
    println!("{}", "Keywords".bold());
    for kw in &result.keywords {
        println!("  {:<10} {:>6.2}", kw.text, kw.score);
    }

    println!();
    match result.sentiment() {
        Sentiment::Positive => println!("Your text expresses positive emotions and sentiment!"),
        Sentiment::Negative => println!("Your text expresses negative emotions and sentiment"),
    }
    if result.is_celebration() {
        println!("{}", "🎉 Very positive!".yellow().bold());
    }
}

pub fn print_history(history: &History) {
    if history.is_empty() {
        println!("{}", "No history yet".dimmed());
        return;
    }

    for (i, item) in history.iter().enumerate() {
        let label = match item.sentiment() {
            Sentiment::Positive => "Positive".green(),
            Sentiment::Negative => "Negative".red(),
        };
        println!(
            "  [{}] {} ({:.0}%)  {}  {}",
            i + 1,
            label,
            item.confidence(),
            history_time(&item.timestamp).dimmed(),
            truncate(&item.text, 40)
        );
    }
}

/// Local wall-clock time of an ISO timestamp, or the raw string if it
/// does not parse.
fn history_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| timestamp.to_string())
}

/// Truncate on a character boundary, appending "..." when shortened.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
