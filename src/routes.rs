use crate::analytics::{analyze, WeaknessReport};
use crate::error::CoachError;
use crate::grader;
use crate::problems::due::DueEntry;
use crate::problems::record::{Difficulty, GradedAttempt, ProblemRecord};
use crate::problems::selector::{self, Recommendation};
use crate::state::app::AppState;
use crate::state::coaching::{GradeOutcome, TopicHistory, UserCoachingState};
use crate::streak::StudyStreak;

/// Session start. Lets an idle streak lapse before anything else runs.
pub async fn start_session(state: &AppState) -> Result<StudyStreak, CoachError> {
    let _guard = state.update_lock.lock().await;
    let current = state.store.get().await?;
    let next = current.activate(state.clock.today());
    if next != current {
        state.store.replace(&next).await?;
    }
    Ok(next.streak)
}

/// Record a graded submission
pub async fn submit_attempt(
    state: &AppState,
    attempt: GradedAttempt,
) -> Result<GradeOutcome, CoachError> {
    // Validate before touching the store
    attempt.validate()?;

    let _guard = state.update_lock.lock().await;
    let current = state.store.get().await?;
    let (next, outcome) = current.record_grade(
        &attempt,
        state.clock.now_ms(),
        state.clock.today(),
        state.config.weakness.removal_window,
    )?;
    state.store.replace(&next).await?;
    Ok(outcome)
}

/// Record a submission graded as free text, falling back to the configured
/// default score when the text carries none
pub async fn submit_feedback(
    state: &AppState,
    problem_id: String,
    topic: String,
    difficulty: Difficulty,
    feedback: &str,
) -> Result<GradeOutcome, CoachError> {
    let score = grader::score_or_default(feedback, state.config.review.default_score);
    submit_attempt(state, GradedAttempt::new(problem_id, topic, difficulty, score)).await
}

/// A concept explanation was delivered; counts toward the streak
pub async fn explain_concept(state: &AppState, topic: &str) -> Result<TopicHistory, CoachError> {
    let _guard = state.update_lock.lock().await;
    let current = state.store.get().await?;
    let (next, history) = current.record_explanation(topic, state.clock.today())?;
    if next != current {
        state.store.replace(&next).await?;
    }
    Ok(history)
}

/// Due problems, most overdue first, capped at `limit` (configured default otherwise)
pub async fn get_due_problems(
    state: &AppState,
    limit: Option<usize>,
) -> Result<Vec<DueEntry>, CoachError> {
    let current = state.store.get().await?;
    let limit = limit.unwrap_or(state.config.review.due_limit);
    Ok(current.due(state.clock.now_ms()).take_entries(limit))
}

pub async fn get_recommendation(state: &AppState) -> Result<Recommendation, CoachError> {
    let current = state.store.get().await?;
    Ok(selector::recommend(
        &current,
        state.clock.now_ms(),
        state.config.review.due_limit,
        state.config.review.recent_limit,
    ))
}

pub async fn analyze_weaknesses(state: &AppState) -> Result<WeaknessReport, CoachError> {
    let current = state.store.get().await?;
    Ok(analyze(&current))
}

pub async fn get_problems_by_topic(
    state: &AppState,
    topic: &str,
) -> Result<Vec<ProblemRecord>, CoachError> {
    let current = state.store.get().await?;
    Ok(selector::get_problems_by_topic(&current.solved_problems, topic)
        .into_iter()
        .cloned()
        .collect())
}

pub async fn get_status(state: &AppState) -> Result<UserCoachingState, CoachError> {
    state.store.get().await
}
