//! Core data structures for the activity ledger
//!
//! - `record`: the immutable `EventRecord` unit of data
//! - `page`: pagination request/response shapes
//! - `stats`: aggregate statistics shapes

mod page;
mod record;
mod stats;

pub use page::{LogPage, PageRequest, RecentActivity, MAX_PER_PAGE, MAX_RECENT_LIMIT};
pub use record::EventRecord;
pub use stats::{ActionTypeStat, ActivityStats};
