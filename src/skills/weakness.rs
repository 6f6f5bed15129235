//! Weak-topic tracking.
//!
//! Membership changes incrementally on each grading event and is never
//! rebuilt from history, so it can differ from a "majority of scores"
//! reading of the same records.

use serde::{Deserialize, Serialize};
use crate::error::CoachError;
use crate::problems::record::ProblemRecord;
use crate::scheduler;

/// A score below this flags the topic as weak
pub const WEAK_BELOW: f64 = 6.0;
/// A score at or above this may clear the flag
pub const CLEAR_AT: f64 = 8.0;
/// Number of most recent records that must all be clean to clear the flag
pub const CLEAR_WINDOW: usize = 3;

/// How the clearing rule treats a topic with fewer than `CLEAR_WINDOW` records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalWindow {
    /// At least three records are required before a topic can be cleared
    #[default]
    Strict,
    /// Check whatever records exist, so one or two clean records can clear a topic
    Vacuous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaknessChange {
    Added,
    Removed,
    Unchanged,
}

/// Topics currently flagged weak, in the order they were flagged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeakTopics(Vec<String>);

impl WeakTopics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.0.iter().any(|t| t == topic)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn insert(&mut self, topic: &str) -> bool {
        if self.contains(topic) {
            return false;
        }
        self.0.push(topic.to_string());
        true
    }

    fn remove(&mut self, topic: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != topic);
        self.0.len() != before
    }

    /// Update the set after `topic` was graded with `score`.
    ///
    /// `topic_records` are that topic's records in chronological grading
    /// order, already including the grading that produced `score`. Only the
    /// last `CLEAR_WINDOW` of them are inspected.
    pub fn on_graded(
        &mut self,
        topic: &str,
        score: f64,
        topic_records: &[&ProblemRecord],
        window: RemovalWindow,
    ) -> Result<WeaknessChange, CoachError> {
        let score = scheduler::clamp_score(score)?;

        if score < WEAK_BELOW {
            if self.insert(topic) {
                tracing::info!(topic = %topic, score = score, "Topic flagged weak");
                return Ok(WeaknessChange::Added);
            }
            return Ok(WeaknessChange::Unchanged);
        }

        if score >= CLEAR_AT && recent_records_clean(topic_records, window) && self.remove(topic) {
            tracing::info!(topic = %topic, score = score, "Topic cleared from weak set");
            return Ok(WeaknessChange::Removed);
        }

        Ok(WeaknessChange::Unchanged)
    }
}

fn recent_records_clean(topic_records: &[&ProblemRecord], window: RemovalWindow) -> bool {
    if window == RemovalWindow::Strict && topic_records.len() < CLEAR_WINDOW {
        return false;
    }
    let start = topic_records.len().saturating_sub(CLEAR_WINDOW);
    topic_records[start..].iter().all(|r| !r.needs_review)
}

impl<'a> IntoIterator for &'a WeakTopics {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
