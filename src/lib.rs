//! Activity Ledger
//!
//! An append-only activity/audit log store with query and aggregation
//! capabilities, decoupled from any transactional database.
//!
//! # Features
//!
//! - **Append-Only**: records are immutable once written; no update or
//!   delete path exists
//! - **Durable**: every append is written to a JSONL log and fsynced
//! - **Thread-Safe**: `append` and all reads take `&self` and are safe
//!   under unbounded concurrent invocation
//! - **Schema-Flexible**: each record carries an open `details` payload
//!   whose shape is action-type specific
//! - **Indexed**: independent access paths by actor, action type and
//!   timestamp
//!
//! # Modules
//!
//! - `types`: Core data structures (EventRecord, pages, statistics)
//! - `store`: Durable append-only store with in-memory indexes
//! - `query`: Paginated retrieval by actor, action type and time range
//! - `aggregate`: Grouped counts and distinct-actor statistics
//! - `recorder`: Typed constructors for each recognized action category
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use activity_ledger::{ActivityRecorder, ActivityStore, PageRequest, StoreConfig};
//!
//! let store = Arc::new(ActivityStore::open(StoreConfig::new("data")).unwrap());
//! let recorder = ActivityRecorder::new(store.clone());
//!
//! recorder.log_login(42, "mika", Some("203.0.113.9"));
//! recorder.log_quiz_attempt(42, "mika", 7, "N5 Vocabulary", 85, 0.85);
//!
//! let page = activity_ledger::query::logs_by_actor(&store, 42, PageRequest::new(1, 20)).unwrap();
//! let stats = activity_ledger::aggregate::statistics(&store, None, None);
//! println!("{} records, {} today", stats.total_logs, stats.today_logs);
//! # let _ = page;
//! ```

pub mod aggregate;
pub mod query;
pub mod recorder;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use query::RecentScope;
pub use recorder::ActivityRecorder;
pub use store::{ActivityStore, LedgerError, LedgerResult, StoreConfig};
pub use types::{
    ActionTypeStat, ActivityStats, EventRecord, LogPage, PageRequest, RecentActivity,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
