use serde::{Deserialize, Serialize};
use crate::problems::record::{Difficulty, ProblemRecord};
use crate::state::coaching::UserCoachingState;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicStats {
    pub topic: String,
    pub total: usize,
    pub needs_review: usize,
    /// Difficulty of each record on the topic, in collection order
    pub difficulties: Vec<Difficulty>,
    pub average_score: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeaknessReport {
    /// Nothing graded yet
    NoData,
    #[serde(rename_all = "camelCase")]
    Analysis {
        topics: Vec<TopicStats>,
        weak_topics: Vec<String>,
        study_streak: u32,
    },
}

/// Per-topic totals in first-seen topic order
pub fn topic_stats(records: &[ProblemRecord]) -> Vec<TopicStats> {
    let mut stats: Vec<TopicStats> = Vec::new();

    for record in records {
        let index = match stats.iter().position(|s| s.topic == record.topic) {
            Some(i) => i,
            None => {
                stats.push(TopicStats {
                    topic: record.topic.clone(),
                    total: 0,
                    needs_review: 0,
                    difficulties: Vec::new(),
                    average_score: 0.0,
                });
                stats.len() - 1
            }
        };
        let entry = &mut stats[index];
        // running mean
        entry.total += 1;
        entry.average_score += (record.last_score - entry.average_score) / entry.total as f64;
        if record.needs_review {
            entry.needs_review += 1;
        }
        entry.difficulties.push(record.difficulty);
    }

    stats
}

pub fn analyze(state: &UserCoachingState) -> WeaknessReport {
    if state.is_empty() {
        return WeaknessReport::NoData;
    }
    WeaknessReport::Analysis {
        topics: topic_stats(&state.solved_problems),
        weak_topics: state.weak_topics.iter().map(str::to_string).collect(),
        study_streak: state.streak.streak,
    }
}
