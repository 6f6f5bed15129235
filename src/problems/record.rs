use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::error::CoachError;
use crate::scheduler::{self, ReviewOutcome, INITIAL_EASINESS_FACTOR};

/// Scores below this flag a problem for review
pub const NEEDS_REVIEW_BELOW: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(CoachError::invalid_input(
                format!("unknown difficulty '{}', expected easy, medium or hard", other),
                "problems",
            )),
        }
    }
}

/// Scheduling state of one problem the user has attempted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRecord {
    pub id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub last_score: f64,
    pub easiness_factor: f64,
    pub interval: u32,
    pub review_count: u32,
    /// Epoch milliseconds at which the problem becomes due
    pub next_review: i64,
    pub needs_review: bool,
    /// Epoch milliseconds of the grading that produced this record
    #[serde(default)]
    pub graded_at: i64,
}

/// One graded submission, as handed over by the grader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedAttempt {
    pub problem_id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    /// 0-10; clamped before use
    pub score: f64,
}

impl GradedAttempt {
    pub fn new<S: Into<String>, T: Into<String>>(
        problem_id: S,
        topic: T,
        difficulty: Difficulty,
        score: f64,
    ) -> Self {
        GradedAttempt {
            problem_id: problem_id.into(),
            topic: topic.into(),
            difficulty,
            score,
        }
    }

    /// Reject attempts that must never be persisted
    pub fn validate(&self) -> Result<(), CoachError> {
        if self.problem_id.trim().is_empty() {
            return Err(CoachError::invalid_input("problem id must not be empty", "problems"));
        }
        if self.topic.trim().is_empty() {
            return Err(CoachError::invalid_input("topic must not be empty", "problems")
                .with_context(format!("problem_id: {}", self.problem_id)));
        }
        scheduler::clamp_score(self.score)
            .map(|_| ())
            .map_err(|e| e.with_context(format!("problem_id: {}", self.problem_id)))
    }
}

impl ProblemRecord {
    /// Apply a graded attempt to an existing record, or create the first one.
    ///
    /// The existing record's EF and interval drive the schedule; everything
    /// else (topic, difficulty) is taken from the attempt.
    pub fn grade(
        existing: Option<&ProblemRecord>,
        attempt: &GradedAttempt,
        now_ms: i64,
    ) -> Result<(ProblemRecord, ReviewOutcome), CoachError> {
        attempt.validate()?;
        let score = scheduler::clamp_score(attempt.score)?;

        let (ef, interval, review_count) = match existing {
            Some(record) => (record.easiness_factor, record.interval, record.review_count),
            None => (INITIAL_EASINESS_FACTOR, 0, 0),
        };

        let outcome = scheduler::next_review(ef, interval, score)
            .map_err(|e| e.with_context(format!("problem_id: {}", attempt.problem_id)))?;

        let record = ProblemRecord {
            id: attempt.problem_id.clone(),
            topic: attempt.topic.clone(),
            difficulty: attempt.difficulty,
            last_score: score,
            easiness_factor: outcome.easiness_factor,
            interval: outcome.interval,
            review_count: review_count.saturating_add(1),
            next_review: scheduler::next_review_timestamp(now_ms, outcome.interval),
            needs_review: score < NEEDS_REVIEW_BELOW,
            graded_at: now_ms,
        };
        Ok((record, outcome))
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_review <= now_ms
    }
}
