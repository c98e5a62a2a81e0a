//! Secondary indexes over the in-memory record set
//!
//! Maintains the three access paths of the store: by actor, by action type
//! and by timestamp. Index values are positions into the insertion-ordered
//! record vector, so the actor and action lists are naturally in append
//! order and the time index supports inclusive range scans.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use chrono::{DateTime, Utc};

use crate::types::EventRecord;

#[derive(Debug, Default)]
pub(crate) struct RecordIndex {
    /// actor_id → positions, append order
    by_actor: HashMap<i64, Vec<usize>>,

    /// action_type → positions, append order
    by_action: HashMap<String, Vec<usize>>,

    /// (timestamp, id) → position; the id component keeps same-tick
    /// entries distinct and insertion-ordered
    by_time: BTreeMap<(DateTime<Utc>, u64), usize>,
}

impl RecordIndex {
    /// Index one record stored at `pos`
    pub fn insert(&mut self, pos: usize, record: &EventRecord) {
        self.by_actor.entry(record.actor_id).or_default().push(pos);
        self.by_action
            .entry(record.action_type.clone())
            .or_default()
            .push(pos);
        self.by_time.insert((record.timestamp, record.id), pos);
    }

    /// Rebuild all indexes from scratch (startup path)
    pub fn rebuild(&mut self, records: &[EventRecord]) {
        self.by_actor.clear();
        self.by_action.clear();
        self.by_time.clear();

        for (pos, record) in records.iter().enumerate() {
            self.insert(pos, record);
        }
    }

    /// Positions of one actor's records, append order
    pub fn actor_positions(&self, actor_id: i64) -> &[usize] {
        self.by_actor.get(&actor_id).map_or(&[], Vec::as_slice)
    }

    /// Positions of one action type's records, append order
    pub fn action_positions(&self, action_type: &str) -> &[usize] {
        self.by_action.get(action_type).map_or(&[], Vec::as_slice)
    }

    /// Positions of records with timestamp in the inclusive `[start, end]`
    /// window; an absent bound is unbounded on that side
    pub fn range_positions(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<usize> {
        let lower = match start {
            Some(ts) => Bound::Included((ts, 0)),
            None => Bound::Unbounded,
        };
        let upper = match end {
            Some(ts) => Bound::Included((ts, u64::MAX)),
            None => Bound::Unbounded,
        };

        self.by_time.range((lower, upper)).map(|(_, &pos)| pos).collect()
    }
}
