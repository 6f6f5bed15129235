use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::error::CoachError;
use crate::problems::due::{due_problems, DueQueue};
use crate::problems::record::{GradedAttempt, ProblemRecord};
use crate::skills::weakness::{RemovalWindow, WeakTopics, WeaknessChange};
use crate::streak::StudyStreak;

/// Everything the coach remembers about one user.
///
/// Transitions take `&self` and hand back a new value; the caller persists
/// it with a whole-object replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserCoachingState {
    pub user_id: Option<String>,
    /// One record per distinct problem id, in first-attempt order
    pub solved_problems: Vec<ProblemRecord>,
    pub weak_topics: WeakTopics,
    #[serde(flatten)]
    pub streak: StudyStreak,
}

/// What a grading event changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    pub record: ProblemRecord,
    pub lapsed: bool,
    /// True when the problem had been graded before
    pub regraded: bool,
    pub weakness: WeaknessChange,
    pub streak: StudyStreak,
}

/// The user's history on a topic, used to pitch an explanation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicHistory {
    pub solved: usize,
    pub struggling: bool,
}

impl UserCoachingState {
    pub fn is_empty(&self) -> bool {
        self.solved_problems.is_empty()
    }

    pub fn find(&self, problem_id: &str) -> Option<&ProblemRecord> {
        self.solved_problems.iter().find(|p| p.id == problem_id)
    }

    /// Records on `topic`, oldest grading first. Equal timestamps keep collection order.
    pub fn topic_records(&self, topic: &str) -> Vec<&ProblemRecord> {
        let mut records: Vec<&ProblemRecord> =
            self.solved_problems.iter().filter(|p| p.topic == topic).collect();
        records.sort_by_key(|p| p.graded_at);
        records
    }

    pub fn due(&self, now_ms: i64) -> DueQueue<'_> {
        due_problems(&self.solved_problems, now_ms)
    }

    /// Apply a graded submission: reschedule the problem, update the weak-topic
    /// set and count the study day.
    ///
    /// Nothing is returned on invalid input, so the stored state stays as it was.
    pub fn record_grade(
        &self,
        attempt: &GradedAttempt,
        now_ms: i64,
        today: NaiveDate,
        window: RemovalWindow,
    ) -> Result<(UserCoachingState, GradeOutcome), CoachError> {
        let index = self.solved_problems.iter().position(|p| p.id == attempt.problem_id);
        let existing = index.map(|i| &self.solved_problems[i]);
        let (record, review) = ProblemRecord::grade(existing, attempt, now_ms)?;

        let mut next = self.clone();
        match index {
            Some(i) => next.solved_problems[i] = record.clone(),
            None => next.solved_problems.push(record.clone()),
        }

        let mut weak_topics = next.weak_topics.clone();
        let weakness = weak_topics.on_graded(
            &record.topic,
            record.last_score,
            &next.topic_records(&record.topic),
            window,
        )?;
        next.weak_topics = weak_topics;
        next.streak = next.streak.record_study_day(today);

        tracing::info!(
            problem_id = %record.id,
            topic = %record.topic,
            score = record.last_score,
            interval = record.interval,
            easiness_factor = record.easiness_factor,
            review_count = record.review_count,
            lapsed = review.lapsed,
            weakness = ?weakness,
            streak = next.streak.streak,
            "Attempt graded"
        );

        let outcome = GradeOutcome {
            record,
            lapsed: review.lapsed,
            regraded: index.is_some(),
            weakness,
            streak: next.streak,
        };
        Ok((next, outcome))
    }

    /// A concept explanation counts as a study day. Topic match is case-insensitive.
    pub fn record_explanation(
        &self,
        topic: &str,
        today: NaiveDate,
    ) -> Result<(UserCoachingState, TopicHistory), CoachError> {
        if topic.trim().is_empty() {
            return Err(CoachError::invalid_input("topic must not be empty", "coaching"));
        }

        let wanted = topic.trim().to_lowercase();
        let on_topic = self
            .solved_problems
            .iter()
            .filter(|p| p.topic.to_lowercase() == wanted);
        let history = TopicHistory {
            solved: on_topic.clone().count(),
            struggling: on_topic.clone().any(|p| p.needs_review),
        };

        let mut next = self.clone();
        next.streak = next.streak.record_study_day(today);

        tracing::info!(
            topic = %topic,
            solved = history.solved,
            struggling = history.struggling,
            streak = next.streak.streak,
            "Explanation recorded"
        );
        Ok((next, history))
    }

    /// Session start: let an idle streak lapse before any study action is counted
    pub fn activate(&self, today: NaiveDate) -> UserCoachingState {
        UserCoachingState {
            streak: self.streak.check_decay(today),
            ..self.clone()
        }
    }
}
