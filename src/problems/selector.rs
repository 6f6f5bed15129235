use serde::{Deserialize, Serialize};
use crate::problems::due::DueEntry;
use crate::problems::record::ProblemRecord;
use crate::state::coaching::UserCoachingState;

/// What the coach should steer the user toward next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Focus {
    /// Revisit the most overdue problem
    Review { problem_id: String },
    /// Nothing due; practise the longest-standing weak topic
    WeakTopic { topic: String },
    /// Nothing due and nothing weak
    NewMaterial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Recommendation {
    /// No graded problems yet
    NoData,
    #[serde(rename_all = "camelCase")]
    Ready {
        focus: Focus,
        /// First `due_limit` due problems, most overdue first
        due: Vec<DueEntry>,
        due_total: usize,
        /// Most recently graded problems, newest first; only filled when nothing is due
        recent: Vec<ProblemRecord>,
        weak_topics: Vec<String>,
        study_streak: u32,
    },
}

/// The `limit` most recently graded records, newest first
pub fn recent_problems(records: &[ProblemRecord], limit: usize) -> Vec<ProblemRecord> {
    let mut recent: Vec<&ProblemRecord> = records.iter().collect();
    // Stable: equal timestamps keep collection order before the reverse
    recent.sort_by_key(|r| r.graded_at);
    recent.into_iter().rev().take(limit).cloned().collect()
}

/// Build the context for the next-problem recommendation
pub fn recommend(
    state: &UserCoachingState,
    now_ms: i64,
    due_limit: usize,
    recent_limit: usize,
) -> Recommendation {
    if state.is_empty() {
        tracing::debug!("No graded problems yet, nothing to recommend");
        return Recommendation::NoData;
    }

    let queue = state.due(now_ms);
    let due = queue.take_entries(due_limit);
    let recent = if queue.is_empty() {
        recent_problems(&state.solved_problems, recent_limit)
    } else {
        Vec::new()
    };

    let focus = match (queue.iter().next(), state.weak_topics.iter().next()) {
        (Some(most_overdue), _) => Focus::Review {
            problem_id: most_overdue.id.clone(),
        },
        (None, Some(topic)) => Focus::WeakTopic {
            topic: topic.to_string(),
        },
        (None, None) => Focus::NewMaterial,
    };

    tracing::info!(
        due_total = queue.len(),
        focus = ?focus,
        "Recommendation built"
    );

    Recommendation::Ready {
        focus,
        due_total: queue.len(),
        due,
        recent,
        weak_topics: state.weak_topics.iter().map(str::to_string).collect(),
        study_streak: state.streak.streak,
    }
}

/// Records on `topic`, compared after trimming
pub fn get_problems_by_topic<'a>(records: &'a [ProblemRecord], topic: &str) -> Vec<&'a ProblemRecord> {
    let expected = topic.trim();
    let filtered: Vec<&ProblemRecord> = records.iter().filter(|p| p.topic.trim() == expected).collect();

    if filtered.is_empty() && !records.is_empty() {
        let available_topics: Vec<_> = records
            .iter()
            .map(|p| p.topic.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        tracing::debug!(
            topic = %topic,
            available_topics = ?available_topics,
            "No problems found for topic"
        );
    }

    filtered
}
