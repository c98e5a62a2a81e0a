//! Aggregate statistics shapes

use serde::Serialize;

/// Per-action-type breakdown over the requested window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionTypeStat {
    /// The action category tag
    pub action_type: String,
    /// Number of events of this type in the window
    pub count: usize,
    /// Number of distinct actors behind those events (deduplicated,
    /// not a total tally)
    pub unique_actors: usize,
}

/// Summary statistics over the ledger
///
/// `total_logs` and `today_logs` are deliberately independent of any
/// requested window: they are constant dashboard figures shown alongside
/// the historical breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    /// Total events ever recorded
    pub total_logs: usize,
    /// Events recorded since UTC midnight today
    pub today_logs: usize,
    /// Window-filtered breakdown, sorted by action type
    pub action_type_stats: Vec<ActionTypeStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let stats = ActivityStats::default();
        assert_eq!(stats.total_logs, 0);
        assert_eq!(stats.today_logs, 0);
        assert!(stats.action_type_stats.is_empty());
    }

    #[test]
    fn test_serializes_flat() {
        let stats = ActivityStats {
            total_logs: 5,
            today_logs: 2,
            action_type_stats: vec![ActionTypeStat {
                action_type: "user_login".to_string(),
                count: 3,
                unique_actors: 2,
            }],
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total_logs\":5"));
        assert!(json.contains("\"today_logs\":2"));
        assert!(json.contains("\"unique_actors\":2"));
    }
}
