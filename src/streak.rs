use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-day study counter, at calendar-day granularity (UTC)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudyStreak {
    #[serde(rename = "studyStreak")]
    pub streak: u32,
    pub last_study_date: Option<NaiveDate>,
}

/// Whole calendar days from `from` to `to` (negative if `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

impl StudyStreak {
    /// Record a qualifying study action on `today`.
    ///
    /// Same day: unchanged. Exactly one day later: +1. Any other gap,
    /// or no previous day: back to 1.
    pub fn record_study_day(self, today: NaiveDate) -> StudyStreak {
        let streak = match self.last_study_date {
            Some(last) if last == today => return self,
            Some(last) if days_between(last, today) == 1 => self.streak.saturating_add(1),
            _ => 1,
        };

        tracing::debug!(
            streak = streak,
            previous = self.streak,
            today = %today,
            "Study day recorded"
        );

        StudyStreak {
            streak,
            last_study_date: Some(today),
        }
    }

    /// Zero the streak when more than one day passed without study.
    ///
    /// `last_study_date` is left alone so the next `record_study_day` still
    /// sees the real gap and restarts at 1.
    pub fn check_decay(self, today: NaiveDate) -> StudyStreak {
        match self.last_study_date {
            Some(last) if days_between(last, today) > 1 && self.streak != 0 => {
                tracing::info!(
                    streak = self.streak,
                    last_study_date = %last,
                    today = %today,
                    "Study streak lapsed"
                );
                StudyStreak {
                    streak: 0,
                    ..self
                }
            }
            _ => self,
        }
    }
}
