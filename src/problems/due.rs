use serde::{Deserialize, Serialize};
use crate::problems::record::ProblemRecord;
use crate::scheduler::MS_PER_DAY;

/// A due problem together with how late it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueEntry {
    pub record: ProblemRecord,
    /// Whole days since the problem became due, rounded
    pub overdue_days: i64,
}

/// Problems due at a fixed instant, most overdue first.
///
/// The order is computed in full on construction; iterating does not
/// consume the queue, so it can be walked any number of times.
#[derive(Debug, Clone)]
pub struct DueQueue<'a> {
    entries: Vec<&'a ProblemRecord>,
    now_ms: i64,
}

/// Select every record with `next_review <= now_ms`, ordered by ascending
/// `next_review`. Ties keep their position in `records`.
pub fn due_problems(records: &[ProblemRecord], now_ms: i64) -> DueQueue<'_> {
    let mut entries: Vec<&ProblemRecord> = records.iter().filter(|r| r.is_due(now_ms)).collect();
    // sort_by_key is stable
    entries.sort_by_key(|r| r.next_review);

    tracing::debug!(
        due_count = entries.len(),
        total_count = records.len(),
        now_ms = now_ms,
        "Built due queue"
    );

    DueQueue { entries, now_ms }
}

pub fn overdue_days(record: &ProblemRecord, now_ms: i64) -> i64 {
    (now_ms.saturating_sub(record.next_review) as f64 / MS_PER_DAY as f64).round() as i64
}

impl<'a> DueQueue<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a ProblemRecord> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Owned copies of the first `limit` entries, for handing to the host
    pub fn take_entries(&self, limit: usize) -> Vec<DueEntry> {
        self.iter()
            .take(limit)
            .map(|record| DueEntry {
                record: record.clone(),
                overdue_days: overdue_days(record, self.now_ms),
            })
            .collect()
    }
}

impl<'q, 'a> IntoIterator for &'q DueQueue<'a> {
    type Item = &'a ProblemRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'q, &'a ProblemRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}
