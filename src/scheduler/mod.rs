//! SM-2 review scheduling.
//!
//! Scores arrive on a 0-10 scale and are halved onto SM-2's 0-5 quality
//! scale. A quality below 3 is a lapse and collapses the interval to one
//! day; anything else grows the interval from the previous one:
//! 0 -> 1 day, 1 -> 6 days, then `round(interval * EF')`.

use serde::{Deserialize, Serialize};
use crate::error::CoachError;

/// Easiness factor given to a problem on its first grading
pub const INITIAL_EASINESS_FACTOR: f64 = 2.5;
/// Floor for the easiness factor
pub const MIN_EASINESS_FACTOR: f64 = 1.3;
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
/// Quality (0-5) below which an attempt is a lapse
pub const LAPSE_QUALITY: f64 = 3.0;
pub const MS_PER_DAY: i64 = 86_400_000;

/// New scheduling parameters after a graded attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub easiness_factor: f64,
    /// Days until the next review
    pub interval: u32,
    /// True when the attempt collapsed the interval
    pub lapsed: bool,
}

/// Clamp a raw grader score into [0, 10].
/// NaN and infinities are rejected rather than coerced.
pub fn clamp_score(score: f64) -> Result<f64, CoachError> {
    if !score.is_finite() {
        return Err(CoachError::invalid_input(
            format!("score must be a finite number, got {}", score),
            "scheduler",
        ));
    }
    Ok(score.clamp(MIN_SCORE, MAX_SCORE))
}

/// Map a 0-10 score onto SM-2's 0-5 quality scale
pub fn quality(score: f64) -> f64 {
    (score / 2.0).min(5.0)
}

/// Compute the next easiness factor and interval for a problem.
///
/// `easiness_factor` must be finite and at least 1.3. `score` is clamped to
/// [0, 10] before use. The interval is unsigned so a negative one cannot
/// reach this function.
pub fn next_review(
    easiness_factor: f64,
    interval: u32,
    score: f64,
) -> Result<ReviewOutcome, CoachError> {
    if !easiness_factor.is_finite() || easiness_factor < MIN_EASINESS_FACTOR {
        return Err(CoachError::invalid_input(
            format!(
                "easiness factor must be a finite number >= {}, got {}",
                MIN_EASINESS_FACTOR, easiness_factor
            ),
            "scheduler",
        ));
    }
    let score = clamp_score(score)?;
    let q = quality(score);

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
    let new_ef = (easiness_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASINESS_FACTOR);

    if q < LAPSE_QUALITY {
        return Ok(ReviewOutcome {
            easiness_factor: new_ef,
            interval: 1,
            lapsed: true,
        });
    }

    let new_interval = match interval {
        0 => 1,
        1 => 6,
        // f64::round is half away from zero; the cast saturates at u32::MAX
        n => (n as f64 * new_ef).round() as u32,
    };

    Ok(ReviewOutcome {
        easiness_factor: new_ef,
        interval: new_interval,
        lapsed: false,
    })
}

/// Absolute due time for an interval granted at `now_ms`
pub fn next_review_timestamp(now_ms: i64, interval: u32) -> i64 {
    now_ms.saturating_add(i64::from(interval).saturating_mul(MS_PER_DAY))
}
