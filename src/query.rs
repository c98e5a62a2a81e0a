//! Paginated retrieval of activity records
//!
//! Four retrieval shapes over the store: by actor, by action type, by time
//! range, and the lightweight recent-activity view. All listings come back
//! newest first; `per_page` is capped server-side (see `types::page`). An
//! empty result set is a valid, non-error outcome for every query here.

use chrono::{DateTime, Duration, Utc};

use crate::store::{ActivityStore, LedgerError, LedgerResult};
use crate::types::{EventRecord, LogPage, PageRequest, RecentActivity, MAX_RECENT_LIMIT};

/// Window used for the privileged recent-activity view
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Scope of the recent-activity view
///
/// The two variants deliberately bound their result sets differently:
/// `AllActors` is time-window-bounded (last 7 days, any actor) while
/// `Actor` is count-bounded on the caller's own stream. Which variant a
/// request gets is the caller's privilege decision, made in the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentScope {
    /// Privileged: recent activity across all actors
    AllActors,
    /// Non-privileged: one actor's own recent activity
    Actor(i64),
}

/// Records for one actor, newest first, with a total count
pub fn logs_by_actor(
    store: &ActivityStore,
    actor_id: i64,
    page: PageRequest,
) -> LedgerResult<LogPage> {
    let records = store.records_for_actor(actor_id)?;
    let total = store.count_for_actor(actor_id)?;

    Ok(paginate(records, page, Some(total)))
}

/// Records of one action type across all actors, newest first
pub fn logs_by_action_type(
    store: &ActivityStore,
    action_type: &str,
    page: PageRequest,
) -> LedgerResult<LogPage> {
    if action_type.trim().is_empty() {
        return Err(LedgerError::Validation(
            "action_type filter must not be empty".to_string(),
        ));
    }

    let records = store.records_for_action(action_type)?;
    Ok(paginate(records, page, None))
}

/// Records in the inclusive `[start, end]` window, optionally restricted
/// to one actor, newest first, with a total count
///
/// At least one bound must be supplied; an unbounded full scan is a usage
/// error, not a query.
pub fn logs_by_time_range(
    store: &ActivityStore,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    actor_id: Option<i64>,
    page: PageRequest,
) -> LedgerResult<LogPage> {
    if start.is_none() && end.is_none() {
        return Err(LedgerError::Validation(
            "at least one of start or end must be provided".to_string(),
        ));
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(LedgerError::Validation(
                "start must not be after end".to_string(),
            ));
        }
    }

    let records = store.records_in_range(start, end, actor_id)?;
    let total = store.count_in_range(start, end, actor_id)?;

    Ok(paginate(records, page, Some(total)))
}

/// Most recent activity for dashboard display
///
/// Privileged scope covers the last [`RECENT_WINDOW_DAYS`] days across all
/// actors; non-privileged scope covers only the caller's own records. Both
/// return at most `limit` records, capped at [`MAX_RECENT_LIMIT`].
pub fn recent_activity(
    store: &ActivityStore,
    scope: RecentScope,
    limit: usize,
) -> LedgerResult<RecentActivity> {
    let limit = limit.clamp(1, MAX_RECENT_LIMIT);

    let records = match scope {
        RecentScope::AllActors => {
            let now = Utc::now();
            let start = now - Duration::days(RECENT_WINDOW_DAYS);
            store.records_in_range(Some(start), Some(now), None)?
        }
        RecentScope::Actor(actor_id) => store.records_for_actor(actor_id)?,
    };

    let activities = records.into_iter().take(limit).collect();
    Ok(RecentActivity { activities, limit })
}

/// Apply page/per_page to an already-sorted record list
fn paginate(records: Vec<EventRecord>, page: PageRequest, total: Option<usize>) -> LogPage {
    let (page, per_page) = page.effective();
    let skip = (page - 1) * per_page;

    let logs = records.into_iter().skip(skip).take(per_page).collect();

    LogPage {
        logs,
        page,
        per_page,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use serde_json::json;
    use tempfile::TempDir;

    fn seeded_store() -> (ActivityStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ActivityStore::open(StoreConfig::new(temp_dir.path().join("data"))).unwrap();
        (store, temp_dir)
    }

    fn ts(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_logs_by_actor_pages_newest_first() {
        let (store, _tmp) = seeded_store();
        for i in 0..5 {
            store
                .append_at(7, "mika", "user_login", json!({"seq": i}), ts(1000 + i * 1000))
                .unwrap();
        }
        store.append(8, "rin", "user_login", json!({})).unwrap();

        let page = logs_by_actor(&store, 7, PageRequest::new(1, 2)).unwrap();
        assert_eq!(page.logs.len(), 2);
        assert_eq!(page.logs[0].details["seq"], 4);
        assert_eq!(page.logs[1].details["seq"], 3);
        assert_eq!(page.total, Some(5));
        assert_eq!((page.page, page.per_page), (1, 2));

        let page2 = logs_by_actor(&store, 7, PageRequest::new(3, 2)).unwrap();
        assert_eq!(page2.logs.len(), 1);
        assert_eq!(page2.logs[0].details["seq"], 0);
    }

    #[test]
    fn test_per_page_capped_at_100() {
        let (store, _tmp) = seeded_store();
        for i in 0..110 {
            store
                .append_at(7, "mika", "user_login", json!({}), ts(1000 + i))
                .unwrap();
        }

        let page = logs_by_actor(&store, 7, PageRequest::new(1, 500)).unwrap();
        assert_eq!(page.logs.len(), 100);
        assert_eq!(page.per_page, 100);
        assert_eq!(page.total, Some(110));
    }

    #[test]
    fn test_unknown_actor_yields_empty_page() {
        let (store, _tmp) = seeded_store();
        let page = logs_by_actor(&store, 99, PageRequest::default()).unwrap();
        assert!(page.logs.is_empty());
        assert_eq!(page.total, Some(0));
    }

    #[test]
    fn test_logs_by_action_type_has_no_total() {
        let (store, _tmp) = seeded_store();
        store.append(7, "mika", "quiz_attempt", json!({})).unwrap();
        store.append(8, "rin", "quiz_attempt", json!({})).unwrap();
        store.append(7, "mika", "user_login", json!({})).unwrap();

        let page = logs_by_action_type(&store, "quiz_attempt", PageRequest::default()).unwrap();
        assert_eq!(page.logs.len(), 2);
        assert_eq!(page.total, None);
    }

    #[test]
    fn test_logs_by_action_type_rejects_empty_filter() {
        let (store, _tmp) = seeded_store();
        let err = logs_by_action_type(&store, " ", PageRequest::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_time_range_requires_a_bound() {
        let (store, _tmp) = seeded_store();
        let err =
            logs_by_time_range(&store, None, None, None, PageRequest::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_time_range_rejects_inverted_window() {
        let (store, _tmp) = seeded_store();
        let err = logs_by_time_range(
            &store,
            Some(ts(5000)),
            Some(ts(1000)),
            None,
            PageRequest::default(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_time_range_inclusive_with_actor_filter() {
        let (store, _tmp) = seeded_store();
        store.append_at(7, "mika", "a", json!({}), ts(1000)).unwrap();
        store.append_at(8, "rin", "b", json!({}), ts(2000)).unwrap();
        store.append_at(7, "mika", "c", json!({}), ts(3000)).unwrap();

        let page = logs_by_time_range(
            &store,
            Some(ts(1000)),
            Some(ts(3000)),
            Some(7),
            PageRequest::default(),
        )
        .unwrap();

        assert_eq!(page.logs.len(), 2);
        assert_eq!(page.total, Some(2));
        assert_eq!(page.logs[0].action_type, "c");
    }

    #[test]
    fn test_time_range_half_open_bounds_allowed() {
        let (store, _tmp) = seeded_store();
        store.append_at(7, "mika", "a", json!({}), ts(1000)).unwrap();
        store.append_at(7, "mika", "b", json!({}), ts(2000)).unwrap();

        let from_only =
            logs_by_time_range(&store, Some(ts(1500)), None, None, PageRequest::default())
                .unwrap();
        assert_eq!(from_only.logs.len(), 1);

        let until_only =
            logs_by_time_range(&store, None, Some(ts(1500)), None, PageRequest::default())
                .unwrap();
        assert_eq!(until_only.logs.len(), 1);
    }

    #[test]
    fn test_recent_activity_actor_scope_is_count_bounded() {
        let (store, _tmp) = seeded_store();
        for i in 0..6 {
            store
                .append_at(7, "mika", "user_login", json!({"seq": i}), ts(1000 + i))
                .unwrap();
        }
        store.append(8, "rin", "user_login", json!({})).unwrap();

        let recent = recent_activity(&store, RecentScope::Actor(7), 4).unwrap();
        assert_eq!(recent.activities.len(), 4);
        assert_eq!(recent.limit, 4);
        assert!(recent.activities.iter().all(|r| r.actor_id == 7));
        // Old records still count; the actor scope has no time window
        assert_eq!(recent.activities[0].details["seq"], 5);
    }

    #[test]
    fn test_recent_activity_all_actors_is_window_bounded() {
        let (store, _tmp) = seeded_store();
        let stale = Utc::now() - Duration::days(RECENT_WINDOW_DAYS + 1);
        store
            .append_at(7, "mika", "user_login", json!({}), stale)
            .unwrap();
        store.append(8, "rin", "post_created", json!({})).unwrap();
        store.append(9, "aoi", "user_login", json!({})).unwrap();

        let recent = recent_activity(&store, RecentScope::AllActors, 10).unwrap();
        assert_eq!(recent.activities.len(), 2);
        assert!(recent.activities.iter().all(|r| r.actor_id != 7));
    }

    #[test]
    fn test_recent_activity_limit_capped() {
        let (store, _tmp) = seeded_store();
        for i in 0..60 {
            store
                .append_at(7, "mika", "user_login", json!({}), ts(1000 + i))
                .unwrap();
        }

        let recent = recent_activity(&store, RecentScope::Actor(7), 500).unwrap();
        assert_eq!(recent.activities.len(), MAX_RECENT_LIMIT);
        assert_eq!(recent.limit, MAX_RECENT_LIMIT);
    }
}
