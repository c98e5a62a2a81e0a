//! Pagination request and response shapes
//!
//! Queries use page/per_page semantics (`skip = (page - 1) * per_page`).
//! `per_page` is capped server-side regardless of what the caller requests,
//! to bound response size and scan cost; the echoed value is the effective
//! (capped) one so clients can compute "has more" from it.

use serde::Serialize;

use super::EventRecord;

/// Hard cap on records per page for paginated listings
pub const MAX_PER_PAGE: usize = 100;

/// Hard cap on the lightweight recent-activity view
pub const MAX_RECENT_LIMIT: usize = 50;

/// Caller-supplied pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// 1-based page number
    pub page: usize,
    /// Requested records per page; capped at [`MAX_PER_PAGE`]
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Effective (page, per_page) after clamping
    pub(crate) fn effective(self) -> (usize, usize) {
        (self.page.max(1), self.per_page.clamp(1, MAX_PER_PAGE))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

/// One page of records plus the pagination echo
#[derive(Debug, Clone, Serialize)]
pub struct LogPage {
    /// Records in newest-first order
    pub logs: Vec<EventRecord>,
    /// Effective page number
    pub page: usize,
    /// Effective per-page cap
    pub per_page: usize,
    /// Total matching records, reported only for time-range and
    /// actor-scoped listings (the extra count scan is not worth it for
    /// the other views)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

/// Result of the lightweight recent-activity view
#[derive(Debug, Clone, Serialize)]
pub struct RecentActivity {
    /// Most recent records, newest first
    pub activities: Vec<EventRecord>,
    /// Effective record cap applied to the view
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_clamps_per_page() {
        let (page, per_page) = PageRequest::new(2, 500).effective();
        assert_eq!(page, 2);
        assert_eq!(per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_effective_normalizes_degenerate_input() {
        let (page, per_page) = PageRequest::new(0, 0).effective();
        assert_eq!(page, 1);
        assert_eq!(per_page, 1);
    }

    #[test]
    fn test_default_page() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 20);
    }
}
