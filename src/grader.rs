//! Adapter between free-text grader feedback and the numeric scheduling core.
//! Nothing here is trusted: the output is always re-validated by the scheduler.

use lazy_static::lazy_static;
use regex::Regex;
use crate::scheduler::{MAX_SCORE, MIN_SCORE};

lazy_static! {
    // Matches "Score: 7/10", "score:7 / 10", "**Score:** 8.5/10"
    static ref SCORE_PATTERN: Regex =
        Regex::new(r"(?i)score:\s*\**\s*(\d+(?:\.\d+)?)\s*/\s*10\b").expect("score pattern is valid");
}

/// Pull the first `Score: X/10` out of grader feedback, clamped to [0, 10]
pub fn extract_score(feedback: &str) -> Option<f64> {
    let captures = SCORE_PATTERN.captures(feedback)?;
    let raw = captures.get(1)?.as_str();
    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() => Some(score.clamp(MIN_SCORE, MAX_SCORE)),
        _ => {
            tracing::debug!(raw = raw, "Unparsable score in grader feedback");
            None
        }
    }
}

/// Score from feedback, or `default` when the feedback carries none
pub fn score_or_default(feedback: &str, default: f64) -> f64 {
    match extract_score(feedback) {
        Some(score) => score,
        None => {
            tracing::warn!(
                default = default,
                preview = %feedback.chars().take(50).collect::<String>(),
                "No score found in grader feedback, using default"
            );
            default
        }
    }
}
