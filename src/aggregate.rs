//! Aggregate statistics over the ledger
//!
//! Computes the per-action-type breakdown (event count plus distinct-actor
//! count) over an optional inclusive time window, alongside two constant
//! dashboard figures: total events ever recorded and events since UTC
//! midnight today. The breakdown is an explicit two-pass scan: filter by
//! window first, then group by action type with a per-group actor set.
//!
//! Statistics are best-effort by design: a store failure yields an empty
//! result object, never a hard error to the caller.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveTime, Utc};
use rayon::prelude::*;
use tracing::error;

use crate::store::{ActivityStore, LedgerResult};
use crate::types::{ActionTypeStat, ActivityStats, EventRecord};

/// Record count above which scans go parallel
const PARALLEL_SCAN_THRESHOLD: usize = 1000;

/// Summary statistics over an optional inclusive `[start, end]` window
///
/// Both bounds optional; no window means all time. `total_logs` and
/// `today_logs` ignore the window on purpose. On store failure an empty
/// `ActivityStats` is returned and the failure is logged.
pub fn statistics(
    store: &ActivityStore,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> ActivityStats {
    match collect(store, start, end) {
        Ok(stats) => stats,
        Err(e) => {
            error!(error = %e, "activity statistics unavailable, returning empty result");
            ActivityStats::default()
        }
    }
}

fn collect(
    store: &ActivityStore,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> LedgerResult<ActivityStats> {
    let records = store.snapshot()?;

    let total_logs = records.len();
    let today_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let today_logs = count_since(&records, today_start);

    Ok(ActivityStats {
        total_logs,
        today_logs,
        action_type_stats: breakdown(&records, start, end),
    })
}

/// Events since `since`, in parallel for large record sets
fn count_since(records: &[EventRecord], since: DateTime<Utc>) -> usize {
    if records.len() > PARALLEL_SCAN_THRESHOLD {
        records.par_iter().filter(|r| r.timestamp >= since).count()
    } else {
        records.iter().filter(|r| r.timestamp >= since).count()
    }
}

/// Two-pass breakdown: window filter, then group with distinct-actor sets
fn breakdown(
    records: &[EventRecord],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Vec<ActionTypeStat> {
    let in_window = |r: &&EventRecord| {
        start.is_none_or(|s| r.timestamp >= s) && end.is_none_or(|e| r.timestamp <= e)
    };

    let filtered: Vec<&EventRecord> = if records.len() > PARALLEL_SCAN_THRESHOLD {
        records.par_iter().filter(in_window).collect()
    } else {
        records.iter().filter(in_window).collect()
    };

    let mut groups: HashMap<&str, (usize, HashSet<i64>)> = HashMap::new();
    for record in filtered {
        let (count, actors) = groups.entry(record.action_type.as_str()).or_default();
        *count += 1;
        actors.insert(record.actor_id);
    }

    let mut stats: Vec<ActionTypeStat> = groups
        .into_iter()
        .map(|(action_type, (count, actors))| ActionTypeStat {
            action_type: action_type.to_string(),
            count,
            unique_actors: actors.len(),
        })
        .collect();

    stats.sort_by(|a, b| a.action_type.cmp(&b.action_type));
    stats
}
